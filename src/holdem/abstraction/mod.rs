pub mod betting;
pub mod tree_state;

pub use betting::BettingAbstraction;
pub use tree_state::{apply, initial_state, legal_actions, TerminalKind, Transition, TreeState};
