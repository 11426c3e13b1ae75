use crate::Chips;

use super::state::Street;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fold => "Fold",
            Self::Check => "Check",
            Self::Call => "Call",
            Self::Bet => "Bet",
            Self::Raise => "Raise",
        }
    }
}

/// A single turn taken by a player. `amount` semantics vary by `kind`:
/// Fold/Check carry 0; Call carries chips actually put in this turn (clipped
/// to stack); Bet/Raise carry chips added this turn on top of what the actor
/// already committed this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub player: usize,
    pub kind: ActionType,
    pub amount: Chips,
    pub to_call_before: Chips,
    pub street: Street,
}

impl Action {
    pub fn fold(player: usize, to_call_before: Chips, street: Street) -> Self {
        Self { player, kind: ActionType::Fold, amount: 0, to_call_before, street }
    }
    pub fn check(player: usize, street: Street) -> Self {
        Self { player, kind: ActionType::Check, amount: 0, to_call_before: 0, street }
    }
    pub fn call(player: usize, amount: Chips, to_call_before: Chips, street: Street) -> Self {
        Self { player, kind: ActionType::Call, amount, to_call_before, street }
    }
    pub fn bet(player: usize, amount: Chips, street: Street) -> Self {
        Self { player, kind: ActionType::Bet, amount, to_call_before: 0, street }
    }
    pub fn raise(player: usize, amount: Chips, to_call_before: Chips, street: Street) -> Self {
        Self { player, kind: ActionType::Raise, amount, to_call_before, street }
    }

    /// Whether two actions denote the same legal choice, ignoring bookkeeping
    /// fields (`to_call_before`, `street`) that don't distinguish options.
    pub fn same_choice(&self, other: &Action) -> bool {
        self.player == other.player && self.kind == other.kind && self.amount == other.amount
    }
}
