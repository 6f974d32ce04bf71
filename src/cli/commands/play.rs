//! Play command - human versus the learning agent in the terminal

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    checkers::Action,
    cli::{load_app_config, output, resolve_table_path},
    error::Error,
    game::{GameSession, Phase, TurnOutcome},
    q_learning::QLearningAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Play against the learning agent")]
pub struct PlayArgs {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Q-table file (overrides storage.table_path)
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial exploration rate (overrides engine.epsilon)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Pause before the agent replies, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Stop after this many games
    #[arg(long, short = 'g')]
    pub games: Option<usize>,
}

const HELP: &str = "\
You play H and move first; the agent plays A.
Pieces move one square diagonally in any direction, or jump an enemy piece
onto the empty square behind it.
Enter moves as four numbers: fromRow fromCol toRow toCol (e.g. `3 1 2 0`).
Type `q` to quit.";

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut config = load_app_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(epsilon) = args.epsilon {
        config.engine.epsilon = epsilon;
    }
    if let Some(delay) = args.delay_ms {
        config.agent_delay_ms = delay;
    }
    config.validate().context("Invalid configuration")?;

    let table_path = resolve_table_path(&config, args.table);
    let agent = QLearningAgent::open(&config.engine, MsgPackRepository::new(), table_path);
    let session_config = config.session.clone().with_auto_restart(false);
    let mut session = GameSession::new(agent, session_config);
    let delay = Duration::from_millis(config.agent_delay_ms);

    println!("{HELP}");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match session.phase() {
            Phase::HumanTurn => {
                println!(
                    "\nRound {}/{}",
                    session.current_round(),
                    session.config().max_rounds
                );
                print!("{}", session.board());
                print!("your move> ");
                io::stdout().flush()?;

                let Some(line) = lines.next() else {
                    break;
                };
                let line = line.context("Failed to read move")?;
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if matches!(line, "q" | "quit" | "exit") {
                    break;
                }

                let action: Action = match line.parse() {
                    Ok(action) => action,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                match session.apply_human_move(action) {
                    Ok(_) => {}
                    Err(e @ (Error::InvalidMove { .. } | Error::WrongPhase { .. })) => {
                        println!("{e}");
                    }
                    Err(e) => return Err(e).context("Failed to save the Q-table"),
                }
            }
            Phase::AgentTurn => {
                thread::sleep(delay);
                let outcome = session
                    .run_agent_turn()
                    .context("Failed to save the Q-table")?;
                if let TurnOutcome::AgentMoved(action) = outcome {
                    println!("agent plays {action}");
                }
            }
            Phase::GameOver => {
                if let Some(result) = session.last_result() {
                    println!();
                    print!("{}", result.final_board);
                    println!("Game over after {} rounds: {}", result.rounds, result.outcome);
                }
                if args.games.is_some_and(|limit| session.stats().games >= limit) {
                    break;
                }
                println!("\nStarting a new game.");
                session.start_new_game();
            }
        }
    }

    output::print_session_summary(&session.stats());
    let agent = session.agent();
    output::print_kv("Learned values", &output::format_number(agent.table_len()));
    output::print_kv(
        "Epsilon",
        &format!("{:.3} (floor {:.3})", agent.epsilon(), agent.min_epsilon()),
    );
    output::print_kv(
        "Alpha / gamma",
        &format!("{} / {}", agent.learning_rate(), agent.discount_factor()),
    );
    output::print_kv("Q-table file", &agent.table_path().display().to_string());
    Ok(())
}
