use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::holdem::abstraction::{apply, initial_state, legal_actions, BettingAbstraction, TerminalKind, Transition, TreeState};
use crate::holdem::engine::Action;
use crate::Chips;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Decision,
    Chance,
    Terminal,
}

/// Carried only by Terminal nodes. Showdown terminals carry `winner_if_fold = None` and a zeroed
/// `chip_delta_if_forced` — equity at a showdown is deliberately left unresolved at build time,
/// to be filled in by downstream equity solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalData {
    pub kind: TerminalKind,
    pub pot: Chips,
    pub committed_total: [Chips; 2],
    pub winner_if_fold: Option<usize>,
    pub chip_delta_if_forced: [Chips; 2],
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: usize,
    pub kind: NodeKind,
    pub key: String,
    pub state: TreeState,
    /// For Decision nodes, `actions[k]` corresponds to `children[k]`. Empty for Chance/Terminal.
    pub actions: Vec<Action>,
    pub children: Vec<usize>,
    pub terminal: Option<TerminalData>,
}

/// A node-indexed DAG: `nodes[i].id == i` and parents are always inserted before their children.
/// Memoisation collapses positions reached by different action sequences into one node, so this
/// is a DAG even though the source calls it a "tree" — downstream equilibrium code depends on
/// that collapsing.
#[derive(Debug, Clone)]
pub struct GameTree {
    pub root_id: usize,
    pub nodes: Vec<TreeNode>,
}

struct Builder<'a> {
    abstraction: &'a BettingAbstraction,
    max_nodes: usize,
    memo: HashMap<String, usize>,
    nodes: Vec<TreeNode>,
}

/// Deterministic encoding of every field that can distinguish legal-action sets or future
/// subtrees, per §4.4's memoisation contract.
fn encode_fields(state: &TreeState) -> String {
    format!(
        "{}|{}|{},{}|{}|{}|{}|{}|{},{}|{},{}|{},{}|{},{}|{}",
        state.street.as_u8(),
        state.pot,
        state.stacks[0],
        state.stacks[1],
        state.to_act,
        state.bet_to_call,
        state.last_bet_size,
        state.current_bet,
        state.committed_this_round[0],
        state.committed_this_round[1],
        state.committed_total[0],
        state.committed_total[1],
        state.folded[0],
        state.folded[1],
        state.acted_this_round[0],
        state.acted_this_round[1],
        state.raises_this_street,
    )
}

impl<'a> Builder<'a> {
    fn reserve(&mut self, key: String, kind: NodeKind, state: TreeState) -> Result<Option<usize>> {
        if let Some(&id) = self.memo.get(&key) {
            return Ok(Some(id));
        }
        let id = self.nodes.len();
        if id >= self.max_nodes {
            bail!("node budget exceeded: {} > {}", id + 1, self.max_nodes);
        }
        self.nodes.push(TreeNode {
            id,
            kind,
            key: key.clone(),
            state,
            actions: Vec::new(),
            children: Vec::new(),
            terminal: None,
        });
        self.memo.insert(key, id);
        Ok(None)
    }

    fn decision(&mut self, state: TreeState) -> Result<usize> {
        let key = format!("D:{}", encode_fields(&state));
        if let Some(id) = self.reserve(key, NodeKind::Decision, state.clone())? {
            return Ok(id);
        }
        let id = self.nodes.len() - 1;

        let actions = legal_actions(&state, self.abstraction);
        let mut children = Vec::with_capacity(actions.len());
        for &action in &actions {
            let transition = apply(&state, action, self.abstraction);
            let child_id = self.dispatch(&state, transition)?;
            children.push(child_id);
        }

        self.nodes[id].actions = actions;
        self.nodes[id].children = children;
        Ok(id)
    }

    fn dispatch(&mut self, _from: &TreeState, transition: Transition) -> Result<usize> {
        if transition.is_terminal {
            self.terminal(transition)
        } else if transition.via_chance {
            self.chance(transition.state)
        } else {
            self.decision(transition.state)
        }
    }

    fn chance(&mut self, state: TreeState) -> Result<usize> {
        let key = format!("C:{}", encode_fields(&state));
        if let Some(id) = self.reserve(key, NodeKind::Chance, state.clone())? {
            return Ok(id);
        }
        let id = self.nodes.len() - 1;
        let child = self.decision(state)?;
        self.nodes[id].children = vec![child];
        Ok(id)
    }

    fn terminal(&mut self, transition: Transition) -> Result<usize> {
        let kind = transition
            .terminal_kind
            .expect("is_terminal transitions always carry a terminal_kind");
        let prefix = match kind {
            TerminalKind::Fold => "T:F:",
            TerminalKind::Showdown => "T:S:",
        };
        let state = transition.state;
        let key = format!("{prefix}{}", encode_fields(&state));
        if let Some(id) = self.reserve(key, NodeKind::Terminal, state.clone())? {
            return Ok(id);
        }
        let id = self.nodes.len() - 1;

        let data = match kind {
            TerminalKind::Fold => {
                let winner = if state.folded[0] { 1 } else { 0 };
                let mut chip_delta = [0; 2];
                chip_delta[winner] = state.pot - state.committed_total[winner];
                chip_delta[1 - winner] = -state.committed_total[1 - winner];
                TerminalData {
                    kind,
                    pot: state.pot,
                    committed_total: state.committed_total,
                    winner_if_fold: Some(winner),
                    chip_delta_if_forced: chip_delta,
                }
            }
            TerminalKind::Showdown => TerminalData {
                kind,
                pot: state.pot,
                committed_total: state.committed_total,
                winner_if_fold: None,
                chip_delta_if_forced: [0, 0],
            },
        };
        self.nodes[id].terminal = Some(data);
        Ok(id)
    }
}

/// Memoised recursive expansion of `abstraction` into a node-indexed [`GameTree`], aborting with
/// an error if the node count would exceed `max_nodes` — the one fatal condition in the core.
/// Building the same abstraction twice produces identical node counts and identical keys in the
/// same positions (the memo keys are a pure function of reachable `TreeState`s).
pub fn build(abstraction: &BettingAbstraction, max_nodes: usize) -> Result<GameTree> {
    let mut builder = Builder {
        abstraction,
        max_nodes,
        memo: HashMap::new(),
        nodes: Vec::new(),
    };
    let root_state = initial_state(abstraction);
    let root_id = builder.decision(root_state)?;
    Ok(GameTree { root_id, nodes: builder.nodes })
}
