//! Serde wire types for the HTTP adapter. Field names and JSON shapes are bit-exact per §6.2 of
//! the engine's external-interface contract; these are pure data carriers with no behaviour of
//! their own beyond the `From` conversions below.

use serde::{Deserialize, Serialize};

use crate::holdem::engine::{Action, State, TerminalResult};
use crate::Chips;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDto {
    pub player: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Chips,
    pub to_call_before: Chips,
    pub street: u8,
}

impl From<&Action> for ActionDto {
    fn from(action: &Action) -> Self {
        Self {
            player: action.player,
            kind: action.kind.name().to_string(),
            amount: action.amount,
            to_call_before: action.to_call_before,
            street: action.street.as_u8(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDto {
    pub street: u8,
    pub street_name: String,
    pub pot: Chips,
    pub stacks: [Chips; 2],
    pub to_act: usize,
    pub bet_to_call: Chips,
    pub last_bet_size: Chips,
    pub committed_total: [Chips; 2],
    pub hole_cards: [[u8; 2]; 2],
    pub board: Vec<u8>,
    pub history: Vec<ActionDto>,
    pub is_terminal: bool,
}

impl From<&State> for StateDto {
    fn from(state: &State) -> Self {
        Self {
            street: state.street.as_u8(),
            street_name: state.street.name().to_string(),
            pot: state.pot,
            stacks: state.stacks,
            to_act: state.to_act,
            bet_to_call: state.bet_to_call,
            last_bet_size: state.last_bet_size,
            committed_total: state.committed_total,
            hole_cards: [
                [state.hole_cards[0][0].id(), state.hole_cards[0][1].id()],
                [state.hole_cards[1][0].id(), state.hole_cards[1][1].id()],
            ],
            board: state.board.iter().map(|c| c.id()).collect(),
            history: state.history.iter().map(ActionDto::from).collect(),
            is_terminal: state.is_terminal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalResultDto {
    pub is_terminal: bool,
    pub winner: i32,
    pub chip_delta: [Chips; 2],
    pub reason: String,
}

impl From<TerminalResult> for TerminalResultDto {
    fn from(result: TerminalResult) -> Self {
        Self {
            is_terminal: result.is_terminal,
            winner: result.winner,
            chip_delta: result.chip_delta,
            reason: result.reason,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyActionRequest {
    pub index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holdem::engine::HandEngine;

    #[test]
    fn state_dto_round_trips_through_json() {
        let mut engine = HandEngine::new(1337);
        let state = engine.new_hand(1000, 5, 10);
        let dto = StateDto::from(&state);
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"street_name\":\"preflop\""));
        assert!(json.contains("\"is_terminal\":false"));
    }

    #[test]
    fn action_dto_uses_type_field_name() {
        let action = Action::check(0, crate::holdem::engine::Street::Preflop);
        let dto = ActionDto::from(&action);
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"type\":\"Check\""));
    }
}
