//! Play command - interactive terminal game

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::JsonModelRepository,
    cli::output,
    policy::Difficulty,
    session::{Session, SessionMode, SessionPhase},
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Play against the automated opponent")]
pub struct PlayArgs {
    /// Difficulty (reactive/easy, optimal/medium, adaptive/hard)
    #[arg(long, short = 'd', default_value = "adaptive")]
    pub difficulty: String,

    /// Share the board with a second human instead of the engine
    #[arg(long)]
    pub two_player: bool,

    /// Path of the persisted opponent model
    #[arg(long, default_value = "oxo-model.json")]
    pub model: PathBuf,

    /// Delay before the engine's reply, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub delay_ms: u64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mode = if args.two_player {
        SessionMode::HumanVsHuman
    } else {
        SessionMode::HumanVsEngine(Difficulty::from_str(&args.difficulty)?)
    };

    let mut session = Session::new(JsonModelRepository::new(), args.model, args.seed);
    if args.delay_ms > 0 {
        session.set_pacing(Some(Duration::from_millis(args.delay_ms)));
    }
    session.select_mode(mode);

    match mode {
        SessionMode::HumanVsHuman => println!("Two-player game. X opens."),
        SessionMode::HumanVsEngine(difficulty) => {
            println!("You are X against the {difficulty} opponent.");
        }
    }
    println!("Enter a cell index (0-8), or r to restart, m for a new mode, q to quit.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", output::render_board(session.board()));
        match session.phase() {
            SessionPhase::Running => {
                print!("{} to move> ", session.board().to_move);
            }
            SessionPhase::Ended(_) | SessionPhase::MenuSelection => {
                print!("r/m/q> ");
            }
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let input = line?;
        let input = input.trim();

        match input {
            "q" => break,
            "m" => {
                session.exit_to_menu();
                let mode = prompt_mode(&mut lines)?;
                session.select_mode(mode);
                continue;
            }
            "r" => {
                session.restart();
                continue;
            }
            _ => {}
        }

        if session.phase() != SessionPhase::Running {
            println!("Game over - r to restart, m for a new mode, q to quit.");
            continue;
        }

        let Ok(position) = input.parse::<usize>() else {
            println!("Unrecognized input '{input}'.");
            continue;
        };

        match session.play_human(position) {
            Ok(report) => report_terminal(&session, report.outcome.is_some()),
            Err(e) => {
                // Invalid moves are ignored at the boundary, never fatal
                println!("{e}");
                continue;
            }
        }

        if session.engine_to_move() {
            let report = session.play_engine()?;
            println!("Engine plays {}.", report.position);
            report_terminal(&session, report.outcome.is_some());
        }
    }

    println!("Final score: {}", output::score_line(session.scores()));
    Ok(())
}

fn prompt_mode(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<SessionMode> {
    loop {
        print!("Mode (1 = vs engine, 2 = two players)> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(SessionMode::HumanVsEngine(Difficulty::Reactive));
        };
        match line?.trim() {
            "2" => return Ok(SessionMode::HumanVsHuman),
            "1" => {
                print!("Difficulty (reactive/optimal/adaptive)> ");
                io::stdout().flush()?;
                let Some(line) = lines.next() else {
                    return Ok(SessionMode::HumanVsEngine(Difficulty::Reactive));
                };
                match Difficulty::from_str(line?.trim()) {
                    Ok(difficulty) => return Ok(SessionMode::HumanVsEngine(difficulty)),
                    Err(e) => println!("{e}"),
                }
            }
            other => println!("Unrecognized mode '{other}'."),
        }
    }
}

fn report_terminal<R: crate::ports::ModelRepository>(session: &Session<R>, concluded: bool) {
    if !concluded {
        return;
    }

    println!("\n{}", output::render_board(session.board()));
    match session.board().winner() {
        Some(Player::X) => println!("X wins!"),
        Some(Player::O) => println!("O wins!"),
        None => println!("It's a draw!"),
    }
    if let Some(line) = session.board().winning_line() {
        println!("Winning line: {}", output::describe_win_line(line));
    }
    println!("Score: {}", output::score_line(session.scores()));
    println!("r to play again, m for a new mode, q to quit.");
}
