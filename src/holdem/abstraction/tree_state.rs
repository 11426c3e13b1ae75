use crate::holdem::engine::action::{Action, ActionType};
use crate::holdem::engine::state::Street;
use crate::Chips;

use super::betting::BettingAbstraction;

/// Cards-free twin of [`crate::holdem::engine::state::State`], carrying only what the tree
/// builder needs to enumerate the abstraction: no dealt cards, no history, `acted_this_round`
/// and `raises_this_street` in their place. Do not merge this with `State` — their lifecycles
/// and equivalence classes differ (see module docs).
#[derive(Debug, Clone, PartialEq)]
pub struct TreeState {
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
    pub acted_this_round: [bool; 2],
    pub raises_this_street: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    Fold,
    Showdown,
}

/// Result of applying a single action to a [`TreeState`]. `via_chance` tells the tree builder
/// to insert a Chance node before the next Decision; `terminal_kind` is set iff `is_terminal`.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: TreeState,
    pub via_chance: bool,
    pub is_terminal: bool,
    pub terminal_kind: Option<TerminalKind>,
}

/// `new_hand`'s blind-posting math, replayed without dealing cards. `acted_this_round` starts
/// `{false, false}` — neither blind counts as a voluntary act, so SB's preflop option is intact.
pub fn initial_state(abstraction: &BettingAbstraction) -> TreeState {
    let sb = abstraction.small_blind;
    let bb = abstraction.big_blind;
    let stack = abstraction.starting_stack;
    TreeState {
        street: Street::Preflop,
        pot: sb + bb,
        stacks: [stack - sb, stack - bb],
        to_act: 0,
        bet_to_call: bb - sb,
        last_bet_size: bb - sb,
        current_bet: bb,
        committed_this_round: [sb, bb],
        committed_total: [sb, bb],
        folded: [false, false],
        acted_this_round: [false, false],
        raises_this_street: 0,
    }
}

fn min_raise_to(state: &TreeState) -> Chips {
    state.current_bet + state.last_bet_size.max(1)
}

fn is_round_closed(state: &TreeState) -> bool {
    state.acted_this_round[0]
        && state.acted_this_round[1]
        && state.committed_this_round[0] == state.committed_this_round[1]
}

/// Read-only: does not mutate `state`. Empty iff `street ∈ {Terminal, Showdown}`. Sizes and the
/// per-street raise cap come from `abstraction` rather than the hand engine's fixed fractions.
pub fn legal_actions(state: &TreeState, abstraction: &BettingAbstraction) -> Vec<Action> {
    if state.street == Street::Terminal || state.street == Street::Showdown {
        return Vec::new();
    }
    let street_idx = state.street.as_u8() as usize;
    let p = state.to_act;
    let stack = state.stacks[p];
    let call = (state.current_bet - state.committed_this_round[p]).max(0);
    let capped = state.raises_this_street >= abstraction.max_raises_per_street;
    let mut options = Vec::new();

    if call > 0 {
        options.push(Action::fold(p, call, state.street));
        options.push(Action::call(p, call.min(stack), call, state.street));
        if stack > call && !capped {
            let target_floor = min_raise_to(state);
            for &x in &abstraction.raise_sizes_by_street[street_idx] {
                let pot_sized = (state.pot as f64 * x).floor() as Chips;
                let target = target_floor.max(state.current_bet + pot_sized);
                let needed = target - state.committed_this_round[p];
                if call < needed && needed < stack {
                    options.push(Action::raise(p, needed, call, state.street));
                }
            }
            if abstraction.allow_all_in {
                options.push(Action::raise(p, stack, call, state.street));
            }
        }
    } else {
        options.push(Action::check(p, state.street));
        if stack > 0 && !capped {
            for &x in &abstraction.bet_sizes_by_street[street_idx] {
                let amount = ((state.pot as f64 * x).floor() as Chips).max(1);
                if amount < stack {
                    options.push(Action::bet(p, amount, state.street));
                }
            }
            if abstraction.allow_all_in {
                options.push(Action::bet(p, stack, state.street));
            }
        }
    }

    options.sort_by_key(|a| (a.kind, a.amount));
    options.dedup_by(|a, b| a.kind == b.kind && a.amount == b.amount);
    options
}

/// Applies `action` to `state`, returning the resulting [`Transition`]. Pure — `state` is cloned,
/// not mutated in place, since the tree builder explores many branches from the same state.
pub fn apply(state: &TreeState, action: Action, abstraction: &BettingAbstraction) -> Transition {
    let p = action.player;
    let opponent = 1 - p;
    let mut s = state.clone();

    match action.kind {
        ActionType::Fold => {
            s.folded[p] = true;
            s.street = Street::Terminal;
            Transition { state: s, via_chance: false, is_terminal: true, terminal_kind: Some(TerminalKind::Fold) }
        }
        ActionType::Check => {
            s.acted_this_round[p] = true;
            if is_round_closed(&s) {
                advance_street(s)
            } else {
                s.to_act = opponent;
                Transition { state: s, via_chance: false, is_terminal: false, terminal_kind: None }
            }
        }
        ActionType::Call => {
            let committed = action.amount.min(s.stacks[p]);
            s.pot += committed;
            s.committed_this_round[p] += committed;
            s.committed_total[p] += committed;
            s.stacks[p] -= committed;
            s.acted_this_round[p] = true;
            s.bet_to_call = (s.current_bet - s.committed_this_round[opponent]).max(0);

            if all_in_showdown(&s) {
                s.street = Street::Terminal;
                Transition { state: s, via_chance: false, is_terminal: true, terminal_kind: Some(TerminalKind::Showdown) }
            } else if is_round_closed(&s) {
                advance_street(s)
            } else {
                s.to_act = opponent;
                Transition { state: s, via_chance: false, is_terminal: false, terminal_kind: None }
            }
        }
        ActionType::Bet | ActionType::Raise => {
            let prior_current_bet = s.current_bet;
            let committed = action.amount;
            s.pot += committed;
            s.committed_this_round[p] += committed;
            s.committed_total[p] += committed;
            s.stacks[p] -= committed;
            s.current_bet = s.current_bet.max(s.committed_this_round[p]);
            s.last_bet_size = (s.current_bet - prior_current_bet).max(1);
            s.raises_this_street += 1;
            s.acted_this_round[p] = true;
            s.acted_this_round[opponent] = false;
            s.bet_to_call = (s.current_bet - s.committed_this_round[opponent]).max(0);

            if all_in_showdown(&s) {
                s.street = Street::Terminal;
                Transition { state: s, via_chance: false, is_terminal: true, terminal_kind: Some(TerminalKind::Showdown) }
            } else {
                s.to_act = opponent;
                Transition { state: s, via_chance: false, is_terminal: false, terminal_kind: None }
            }
        }
    }
}

fn all_in_showdown(state: &TreeState) -> bool {
    state.stacks[0] == 0 && state.stacks[1] == 0 && !state.folded[0] && !state.folded[1]
}

/// Resets round bookkeeping and advances to the next street. River closure skips the transient
/// Showdown street entirely and lands directly on Terminal (no cards to reveal here).
fn advance_street(mut state: TreeState) -> Transition {
    state.bet_to_call = 0;
    state.current_bet = 0;
    state.last_bet_size = 0;
    state.committed_this_round = [0, 0];
    state.acted_this_round = [false, false];
    state.raises_this_street = 0;

    match state.street {
        Street::Preflop => {
            state.street = Street::Flop;
            state.to_act = 0;
            Transition { state, via_chance: true, is_terminal: false, terminal_kind: None }
        }
        Street::Flop => {
            state.street = Street::Turn;
            state.to_act = 0;
            Transition { state, via_chance: true, is_terminal: false, terminal_kind: None }
        }
        Street::Turn => {
            state.street = Street::River;
            state.to_act = 0;
            Transition { state, via_chance: true, is_terminal: false, terminal_kind: None }
        }
        Street::River => {
            state.street = Street::Terminal;
            Transition { state, via_chance: false, is_terminal: true, terminal_kind: Some(TerminalKind::Showdown) }
        }
        Street::Showdown | Street::Terminal => {
            unreachable!("abstract state never advances past river without reaching terminal")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acted_this_round_starts_false_so_sb_keeps_preflop_option() {
        let abstraction = BettingAbstraction::default();
        let state = initial_state(&abstraction);
        assert_eq!(state.acted_this_round, [false, false]);
    }

    #[test]
    fn limp_then_check_closes_preflop_via_acted_flags() {
        let abstraction = BettingAbstraction::default();
        let state = initial_state(&abstraction);

        let call = Action::call(0, state.bet_to_call, state.bet_to_call, state.street);
        let transition = apply(&state, call, &abstraction);
        assert!(!transition.is_terminal);
        assert_eq!(transition.state.to_act, 1);

        let check = Action::check(1, transition.state.street);
        let transition = apply(&transition.state, check, &abstraction);
        assert!(transition.via_chance);
        assert_eq!(transition.state.street, Street::Flop);
        assert_eq!(transition.state.acted_this_round, [false, false]);
    }

    #[test]
    fn raise_cap_hides_further_aggression() {
        let mut abstraction = BettingAbstraction::default();
        abstraction.max_raises_per_street = 0;
        let state = initial_state(&abstraction);
        // BB already posted a bet-equivalent preflop, but the cap applies to *further*
        // raises; the facing player (SB) should see no raise option at all.
        let options = legal_actions(&state, &abstraction);
        assert!(options.iter().all(|a| a.kind != ActionType::Raise));
    }

    #[test]
    fn river_close_skips_showdown_street() {
        let abstraction = BettingAbstraction::default();
        let mut state = initial_state(&abstraction);
        state.street = Street::River;
        state.to_act = 1;
        state.acted_this_round = [true, false];
        let check = Action::check(1, state.street);
        let transition = apply(&state, check, &abstraction);
        assert!(transition.is_terminal);
        assert_eq!(transition.terminal_kind, Some(TerminalKind::Showdown));
        assert_eq!(transition.state.street, Street::Terminal);
    }

    #[test]
    fn all_in_call_forces_immediate_showdown() {
        let abstraction = BettingAbstraction::default();
        let state = initial_state(&abstraction);

        let shove = Action::raise(0, 995, state.bet_to_call, state.street);
        let transition = apply(&state, shove, &abstraction);
        assert!(!transition.is_terminal);

        let call_amount = transition.state.stacks[1];
        let call = Action::call(1, call_amount, transition.state.bet_to_call, transition.state.street);
        let transition = apply(&transition.state, call, &abstraction);

        assert!(transition.is_terminal);
        assert_eq!(transition.terminal_kind, Some(TerminalKind::Showdown));
        assert_eq!(transition.state.stacks, [0, 0]);
    }
}
