use serde::{Deserialize, Serialize};

use crate::{Chips, B_BLIND, S_BLIND, STACK};

/// Configuration input to [`crate::holdem::tree::build`]: the discrete pot-fraction sizes and
/// per-street raise cap that keep the abstracted game tree finite. Mirrors §6.1 of the betting
/// abstraction contract field-for-field so it can be deserialized straight from a JSON config
/// file or an HTTP body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BettingAbstraction {
    pub starting_stack: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub max_raises_per_street: u32,
    pub allow_all_in: bool,
    /// Pot fractions offered when `call == 0`, indexed by street (Preflop, Flop, Turn, River).
    pub bet_sizes_by_street: [Vec<f64>; 4],
    /// Pot fractions offered when `call > 0`, indexed by street (Preflop, Flop, Turn, River).
    pub raise_sizes_by_street: [Vec<f64>; 4],
}

impl Default for BettingAbstraction {
    /// Matches the hand engine's own defaults (`stack=1000, sb=5, bb=10`, `{0.5, 1.0, 2.0}`
    /// sizing on every street, all-in always offered) so a tree can be built without a config
    /// file present.
    fn default() -> Self {
        let sizes = vec![0.5, 1.0, 2.0];
        Self {
            starting_stack: STACK,
            small_blind: S_BLIND,
            big_blind: B_BLIND,
            max_raises_per_street: 4,
            allow_all_in: true,
            bet_sizes_by_street: [sizes.clone(), sizes.clone(), sizes.clone(), sizes.clone()],
            raise_sizes_by_street: [sizes.clone(), sizes.clone(), sizes.clone(), sizes],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deserializes_from_empty_json_object() {
        let parsed: BettingAbstraction = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, BettingAbstraction::default());
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let parsed: BettingAbstraction =
            serde_json::from_str(r#"{"max_raises_per_street": 2}"#).unwrap();
        assert_eq!(parsed.max_raises_per_street, 2);
        assert_eq!(parsed.starting_stack, 1000);
    }
}
