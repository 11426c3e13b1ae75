//! Interactive and auto-simulate terminal driver. Integer prompts only, per §6.3.

use clap::Parser;
use colored::Colorize;
use dialoguer::Input;

use crate::holdem::engine::{legal_actions, terminal_payoff, Action, ActionType, HandEngine, State};
use crate::{Chips, B_BLIND, S_BLIND, STACK};

/// 200-action ceiling per hand — tripping it indicates an engine bug, not user error.
const ACTION_GUARD: u32 = 200;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Heads-up hold'em engine CLI")]
pub struct CliArgs {
    /// 0 = interactive, 1 = auto-simulate 10 hands with a uniform random policy.
    #[arg(long, default_value_t = 0)]
    pub mode: u8,
    #[arg(long, default_value_t = 1337)]
    pub seed: u64,
    #[arg(long, default_value_t = STACK)]
    pub stack: Chips,
    #[arg(long, default_value_t = S_BLIND)]
    pub small_blind: Chips,
    #[arg(long, default_value_t = B_BLIND)]
    pub big_blind: Chips,
}

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    match args.mode {
        0 => interactive(&args),
        1 => auto_simulate(&args),
        other => anyhow::bail!("mode must be 0 (interactive) or 1 (auto-simulate), got {other}"),
    }
}

fn interactive(args: &CliArgs) -> anyhow::Result<()> {
    let controlled = prompt_controlled_player()?;
    let mut engine = HandEngine::new(args.seed);
    let mut state = engine.new_hand(args.stack, args.small_blind, args.big_blind);
    let mut guard = 0u32;

    while !state.is_terminal() {
        guard += 1;
        if guard > ACTION_GUARD {
            log::error!("exceeded {ACTION_GUARD}-action guard without reaching terminal");
            anyhow::bail!("infinite-loop guard tripped");
        }

        print_state(&state);
        let options = legal_actions(&state);
        print_options(&options);

        let action = if state.to_act == controlled {
            let index = prompt_action_index(options.len())?;
            options[index]
        } else {
            let action = engine.random_legal_action(&state);
            println!("{}", format!("(opponent plays {})", describe(&action)).dimmed());
            action
        };

        if !engine.apply_action(&mut state, action) {
            log::error!("engine rejected an action drawn from legal_actions");
            anyhow::bail!("illegal action selected");
        }
    }

    let result = terminal_payoff(&state);
    println!(
        "{} reason={} winner={} chip_delta={:?}",
        "terminal:".bold(),
        result.reason,
        result.winner,
        result.chip_delta
    );
    Ok(())
}

fn auto_simulate(args: &CliArgs) -> anyhow::Result<()> {
    let mut engine = HandEngine::new(args.seed);
    let mut folds = 0u32;
    let mut showdowns = 0u32;

    for hand_no in 1..=10 {
        let mut state = engine.new_hand(args.stack, args.small_blind, args.big_blind);
        let mut guard = 0u32;
        while !state.is_terminal() {
            guard += 1;
            if guard > ACTION_GUARD {
                log::error!("hand {hand_no}: exceeded {ACTION_GUARD}-action guard");
                anyhow::bail!("infinite-loop guard tripped on hand {hand_no}");
            }
            let action = engine.random_legal_action(&state);
            if !engine.apply_action(&mut state, action) {
                log::error!("hand {hand_no}: engine rejected a random_legal_action result");
                anyhow::bail!("illegal action selected on hand {hand_no}");
            }
        }

        let result = terminal_payoff(&state);
        match result.reason.as_str() {
            "fold" => folds += 1,
            "showdown" => showdowns += 1,
            other => anyhow::bail!("hand {hand_no}: unresolved terminal reason {other:?}"),
        }
        println!(
            "hand {hand_no:>2}: reason={:<8} winner={} chip_delta={:?}",
            result.reason, result.winner, result.chip_delta
        );
    }

    println!("--\n{folds} folds, {showdowns} showdowns over 10 hands");
    Ok(())
}

fn prompt_controlled_player() -> anyhow::Result<usize> {
    let choice: usize = Input::new()
        .with_prompt("control which player")
        .validate_with(|i: &usize| -> Result<(), String> {
            if *i <= 1 {
                Ok(())
            } else {
                Err("enter 0 or 1".into())
            }
        })
        .interact_text()?;
    Ok(choice)
}

fn prompt_action_index(count: usize) -> anyhow::Result<usize> {
    let choice: usize = Input::new()
        .with_prompt(format!("your action [0..{}]", count - 1))
        .validate_with(|i: &usize| -> Result<(), String> {
            if *i < count {
                Ok(())
            } else {
                Err(format!("enter an index between 0 and {}", count - 1))
            }
        })
        .interact_text()?;
    Ok(choice)
}

fn print_state(state: &State) {
    println!(
        "{} pot={} stacks={:?} board={}",
        format!("[{}]", state.street.name()).bold(),
        state.pot,
        state.stacks,
        state.board.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "),
    );
}

fn print_options(options: &[Action]) {
    for (i, action) in options.iter().enumerate() {
        println!("  {i}: {}", describe(action));
    }
}

fn describe(action: &Action) -> String {
    let text = format!("{} {}", action.kind.name(), action.amount);
    match action.kind {
        ActionType::Fold => text.red().to_string(),
        ActionType::Check => text.cyan().to_string(),
        ActionType::Call => text.yellow().to_string(),
        ActionType::Bet | ActionType::Raise => text.green().to_string(),
    }
}
