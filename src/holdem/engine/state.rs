use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::holdem::cards::{evaluate_7, Card};
use crate::Chips;

use super::action::{Action, ActionType};

/// Ordered betting street. Showdown is transient (entered and exited within a
/// single `apply_action` call); Terminal is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
    Showdown = 4,
    Terminal = 5,
}

impl Street {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
            Self::Terminal => "terminal",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Preflop => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::River,
            Self::River => Self::Showdown,
            Self::Showdown | Self::Terminal => Self::Terminal,
        }
    }
}

/// Mutable record of a single heads-up hand. Created by [`HandEngine::new_hand`],
/// mutated only through [`HandEngine::apply_action`], and read-only once
/// `street == Street::Terminal`.
#[derive(Debug, Clone)]
pub struct State {
    pub street: Street,
    pub pot: Chips,
    pub stacks: [Chips; 2],
    pub to_act: usize,
    pub bet_to_call: Chips,
    pub last_bet_size: Chips,
    pub current_bet: Chips,
    pub committed_this_round: [Chips; 2],
    pub committed_total: [Chips; 2],
    pub folded: [bool; 2],
    pub history: Vec<Action>,
    pub hole_cards: [[Card; 2]; 2],
    pub board: Vec<Card>,
    used_cards: [bool; 52],
}

impl State {
    pub fn is_terminal(&self) -> bool {
        self.street == Street::Terminal
    }

    fn opponent(&self) -> usize {
        1 - self.to_act
    }

    fn min_raise_to(&self) -> Chips {
        self.current_bet + self.last_bet_size.max(1)
    }

    /// Round-closure via history peek: scan backward through this street's
    /// actions until the most recent aggression (inclusive), and check both
    /// seats have acted since then. Fragile by construction — see the tree
    /// builder's twin, which tracks explicit `acted_this_round` flags instead.
    fn is_round_closed(&self) -> bool {
        if self.committed_this_round[0] != self.committed_this_round[1] {
            return false;
        }
        let mut seen = [false; 2];
        for action in self.history.iter().rev() {
            if action.street != self.street {
                break;
            }
            seen[action.player] = true;
            if matches!(action.kind, ActionType::Bet | ActionType::Raise) {
                break;
            }
        }
        seen[0] && seen[1]
    }
}

/// `(is_terminal, winner, chip_delta, reason)`. `winner = -1` denotes a split pot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalResult {
    pub is_terminal: bool,
    pub winner: i32,
    pub chip_delta: [Chips; 2],
    pub reason: String,
}

impl TerminalResult {
    fn not_terminal() -> Self {
        Self { is_terminal: false, winner: 0, chip_delta: [0, 0], reason: String::new() }
    }
}

/// Owns the per-instance seeded generator used to deal hole/board cards and to
/// pick uniform random legal actions. Determinism is per-instance, per-seed;
/// the generator is never shared across engine instances.
pub struct HandEngine {
    rng: SmallRng,
}

impl HandEngine {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    fn draw_cards(&mut self, state: &mut State, n: usize) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(n);
        while drawn.len() < n {
            let id = self.rng.random_range(0..52u8);
            if !state.used_cards[id as usize] {
                state.used_cards[id as usize] = true;
                drawn.push(Card::new(id));
            }
        }
        drawn
    }

    fn deal_remaining_board(&mut self, state: &mut State) {
        let needed = 5 - state.board.len();
        if needed > 0 {
            let cards = self.draw_cards(state, needed);
            state.board.extend(cards);
        }
    }

    /// `new_hand(starting_stack=1000, sb=5, bb=10) -> State`. Player 0 is SB,
    /// player 1 is BB; SB acts first preflop.
    pub fn new_hand(&mut self, starting_stack: Chips, sb: Chips, bb: Chips) -> State {
        let mut state = State {
            street: Street::Preflop,
            pot: sb + bb,
            stacks: [starting_stack - sb, starting_stack - bb],
            to_act: 0,
            bet_to_call: bb - sb,
            last_bet_size: bb - sb,
            current_bet: bb,
            committed_this_round: [sb, bb],
            committed_total: [sb, bb],
            folded: [false, false],
            history: Vec::new(),
            hole_cards: [[Card::new(0), Card::new(0)]; 2],
            board: Vec::new(),
            used_cards: [false; 52],
        };
        for player in 0..2 {
            let cards = self.draw_cards(&mut state, 2);
            state.hole_cards[player] = [cards[0], cards[1]];
        }
        state
    }

    /// Rejects (returns `false`, no mutation) if `action` is not a legal
    /// choice `(player, type, amount)` in the current state.
    pub fn apply_action(&mut self, state: &mut State, action: Action) -> bool {
        let legal = legal_actions(state);
        if !legal.iter().any(|a| a.same_choice(&action)) {
            return false;
        }
        let player = action.player;
        let opponent = 1 - player;
        state.history.push(action);

        match action.kind {
            ActionType::Fold => {
                state.folded[player] = true;
                state.street = Street::Terminal;
            }
            ActionType::Check => {
                if state.is_round_closed() {
                    self.advance_street(state);
                } else {
                    state.to_act = opponent;
                }
            }
            ActionType::Call => {
                let committed = action.amount.min(state.stacks[player]);
                state.pot += committed;
                state.committed_this_round[player] += committed;
                state.committed_total[player] += committed;
                state.stacks[player] -= committed;
                state.bet_to_call =
                    (state.current_bet - state.committed_this_round[opponent]).max(0);

                if state.stacks[0] == 0 && state.stacks[1] == 0 && !state.folded[0] && !state.folded[1]
                {
                    self.deal_remaining_board(state);
                    state.street = Street::Terminal;
                } else if state.is_round_closed() {
                    self.advance_street(state);
                } else {
                    state.to_act = opponent;
                }
            }
            ActionType::Bet | ActionType::Raise => {
                let prior_current_bet = state.current_bet;
                let committed = action.amount;
                state.pot += committed;
                state.committed_this_round[player] += committed;
                state.committed_total[player] += committed;
                state.stacks[player] -= committed;
                state.current_bet = state.current_bet.max(state.committed_this_round[player]);
                state.last_bet_size = (state.current_bet - prior_current_bet).max(1);
                state.bet_to_call =
                    (state.current_bet - state.committed_this_round[opponent]).max(0);

                if state.stacks[0] == 0 && state.stacks[1] == 0 && !state.folded[0] && !state.folded[1]
                {
                    self.deal_remaining_board(state);
                    state.street = Street::Terminal;
                } else {
                    state.to_act = opponent;
                }
            }
        }
        true
    }

    fn advance_street(&mut self, state: &mut State) {
        state.bet_to_call = 0;
        state.current_bet = 0;
        state.last_bet_size = 0;
        state.committed_this_round = [0, 0];

        let next = state.street.next();
        match next {
            Street::Flop => {
                let cards = self.draw_cards(state, 3);
                state.board.extend(cards);
                state.street = Street::Flop;
                state.to_act = 0;
            }
            Street::Turn => {
                let cards = self.draw_cards(state, 1);
                state.board.extend(cards);
                state.street = Street::Turn;
                state.to_act = 0;
            }
            Street::River => {
                let cards = self.draw_cards(state, 1);
                state.board.extend(cards);
                state.street = Street::River;
                state.to_act = 0;
            }
            Street::Showdown | Street::Terminal => {
                self.deal_remaining_board(state);
                state.street = Street::Terminal;
            }
            Street::Preflop => unreachable!("street never advances back to preflop"),
        }
    }

    /// Uniform random choice over `legal_actions(state)`.
    pub fn random_legal_action(&mut self, state: &State) -> Action {
        let options = legal_actions(state);
        let index = self.rng.random_range(0..options.len());
        options[index]
    }
}

/// Read-only: does not mutate `state`. Empty iff `street ∈ {Terminal, Showdown}`.
pub fn legal_actions(state: &State) -> Vec<Action> {
    if state.street == Street::Terminal || state.street == Street::Showdown {
        return Vec::new();
    }
    const FRACTIONS: [f64; 3] = [0.5, 1.0, 2.0];

    let p = state.to_act;
    let stack = state.stacks[p];
    let call = (state.current_bet - state.committed_this_round[p]).max(0);
    let mut options = Vec::new();

    if call > 0 {
        options.push(Action::fold(p, call, state.street));
        options.push(Action::call(p, call.min(stack), call, state.street));
        if stack > call {
            let min_raise_to = state.min_raise_to();
            for &x in &FRACTIONS {
                let pot_sized = (state.pot as f64 * x).floor() as Chips;
                let target = min_raise_to.max(state.current_bet + pot_sized);
                let needed = target - state.committed_this_round[p];
                if call < needed && needed < stack {
                    options.push(Action::raise(p, needed, call, state.street));
                }
            }
            options.push(Action::raise(p, stack, call, state.street));
        }
    } else {
        options.push(Action::check(p, state.street));
        if stack > 0 {
            for &x in &FRACTIONS {
                let amount = ((state.pot as f64 * x).floor() as Chips).max(1);
                if amount < stack {
                    options.push(Action::bet(p, amount, state.street));
                }
            }
            options.push(Action::bet(p, stack, state.street));
        }
    }

    options.sort_by_key(|a| (a.kind, a.amount));
    options.dedup_by(|a, b| a.kind == b.kind && a.amount == b.amount);
    options
}

/// Read-only: does not mutate `state`. Requires `street == Terminal`; returns
/// a zeroed sentinel with `is_terminal = false` otherwise.
pub fn terminal_payoff(state: &State) -> TerminalResult {
    if state.street != Street::Terminal {
        return TerminalResult::not_terminal();
    }

    let pot = state.pot;
    let (winner, reason, payout): (i32, &'static str, [Chips; 2]) =
        if state.folded[0] != state.folded[1] {
            let winner = if state.folded[0] { 1 } else { 0 };
            let mut payout = [0; 2];
            payout[winner] = pot;
            (winner as i32, "fold", payout)
        } else {
            let board = board_array(&state.board);
            let hole0 = [state.hole_cards[0][0].id(), state.hole_cards[0][1].id()];
            let hole1 = [state.hole_cards[1][0].id(), state.hole_cards[1][1].id()];
            let score0 = evaluate_7(hole0, board);
            let score1 = evaluate_7(hole1, board);
            match score0.cmp(&score1) {
                Ordering::Greater => (0, "showdown", [pot, 0]),
                Ordering::Less => (1, "showdown", [0, pot]),
                Ordering::Equal => {
                    let half = pot / 2;
                    let odd = pot - half * 2;
                    (-1, "showdown", [half + odd, half])
                }
            }
        };

    let mut chip_delta = [0; 2];
    for p in 0..2 {
        chip_delta[p] = payout[p] - state.committed_total[p];
    }
    TerminalResult { is_terminal: true, winner, chip_delta, reason: reason.to_string() }
}

fn board_array(board: &[Card]) -> [u8; 5] {
    assert_eq!(board.len(), 5, "terminal payoff requires a complete board");
    [
        board[0].id(),
        board[1].id(),
        board[2].id(),
        board[3].id(),
        board[4].id(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> HandEngine {
        HandEngine::new(1337)
    }

    fn apply(engine: &mut HandEngine, state: &mut State, action: Action) -> bool {
        engine.apply_action(state, action)
    }

    #[test]
    fn sb_open_fold_preflop_pays_bb() {
        let mut engine = engine();
        let mut state = engine.new_hand(1000, 5, 10);
        let fold = Action::fold(0, state.bet_to_call, state.street);
        assert!(apply(&mut engine, &mut state, fold));
        assert!(state.is_terminal());

        let result = terminal_payoff(&state);
        assert_eq!(result.reason, "fold");
        assert_eq!(result.winner, 1);
        assert_eq!(result.chip_delta, [-5, 5]);
    }

    #[test]
    fn limp_check_preflop_reaches_flop() {
        let mut engine = engine();
        let mut state = engine.new_hand(1000, 5, 10);

        let call = Action::call(0, state.bet_to_call, state.bet_to_call, state.street);
        assert!(apply(&mut engine, &mut state, call));
        assert_eq!(state.street, Street::Preflop);
        assert_eq!(state.to_act, 1);

        let check = Action::check(1, state.street);
        assert!(apply(&mut engine, &mut state, check));

        assert_eq!(state.street, Street::Flop);
        assert_eq!(state.board.len(), 3);
        assert_eq!(state.committed_this_round, [0, 0]);
        assert_eq!(state.current_bet, 0);
        assert_eq!(state.to_act, 0);
        assert_eq!(state.pot, 20);
    }

    #[test]
    fn preflop_open_raise_then_fold() {
        let mut engine = engine();
        let mut state = engine.new_hand(1000, 5, 10);

        let call = Action::call(0, state.bet_to_call, state.bet_to_call, state.street);
        assert!(apply(&mut engine, &mut state, call));

        // BB faces call == 0 after the limp, so the aggressive option here is
        // typed Bet, not Raise, even though colloquially it re-opens betting.
        let open_raise = Action::bet(1, 20, state.street);
        assert!(apply(&mut engine, &mut state, open_raise));
        assert_eq!(state.current_bet, 30);

        let fold = Action::fold(0, state.bet_to_call, state.street);
        assert!(apply(&mut engine, &mut state, fold));

        assert!(state.is_terminal());
        let result = terminal_payoff(&state);
        assert_eq!(result.reason, "fold");
        assert_eq!(result.winner, 1);
        assert_eq!(result.chip_delta, [-10, 10]);
    }

    #[test]
    fn all_in_preflop_forces_showdown() {
        let mut engine = engine();
        let mut state = engine.new_hand(1000, 5, 10);

        let shove = Action::raise(0, 995, state.bet_to_call, state.street);
        assert!(apply(&mut engine, &mut state, shove));

        let call_amount = state.stacks[1];
        let call = Action::call(1, call_amount, state.bet_to_call, state.street);
        assert!(apply(&mut engine, &mut state, call));

        assert!(state.is_terminal());
        assert_eq!(state.board.len(), 5);
        let result = terminal_payoff(&state);
        assert_eq!(result.reason, "showdown");
        assert_eq!(result.chip_delta[0].abs(), result.chip_delta[1].abs());
        assert_eq!(result.chip_delta[0] + result.chip_delta[1], 0);
    }

    #[test]
    fn legal_actions_empty_iff_terminal_or_showdown() {
        let mut engine = engine();
        let mut state = engine.new_hand(1000, 5, 10);
        assert!(!legal_actions(&state).is_empty());

        let fold = Action::fold(0, state.bet_to_call, state.street);
        apply(&mut engine, &mut state, fold);
        assert!(legal_actions(&state).is_empty());
    }

    #[test]
    fn terminal_payoff_on_nonterminal_state_is_sentinel() {
        let mut engine = engine();
        let state = engine.new_hand(1000, 5, 10);
        let result = terminal_payoff(&state);
        assert!(!result.is_terminal);
        assert_eq!(result.chip_delta, [0, 0]);
    }

    #[test]
    fn random_play_always_conserves_chips_and_terminates() {
        for seed in 0..20u64 {
            let mut engine = HandEngine::new(seed);
            let mut state = engine.new_hand(1000, 5, 10);
            let mut guard = 0;
            while !state.is_terminal() {
                guard += 1;
                assert!(guard <= 200, "seed {seed} did not terminate");
                let action = engine.random_legal_action(&state);
                assert!(engine.apply_action(&mut state, action));
                assert_eq!(state.pot, state.committed_total[0] + state.committed_total[1]);
                assert!(state.stacks[0] >= 0 && state.stacks[1] >= 0);
            }
            let result = terminal_payoff(&state);
            assert!(result.reason == "fold" || result.reason == "showdown");
            assert_eq!(result.chip_delta[0] + result.chip_delta[1], 0);
        }
    }
}
