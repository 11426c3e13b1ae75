pub mod action;
pub mod state;

pub use action::{Action, ActionType};
pub use state::{legal_actions, terminal_payoff, HandEngine, State, Street, TerminalResult};
