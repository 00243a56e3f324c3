//! Simulate command - headless self-play for exercising the difficulty tiers

use std::{path::PathBuf, str::FromStr};

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    adapters::{InMemoryRepository, JsonModelRepository},
    cli::output,
    policy::{self, Difficulty},
    ports::ModelRepository,
    search,
    session::{Session, SessionMode, SessionPhase},
};

#[derive(Parser, Debug)]
#[command(about = "Run headless games against a scripted opponent")]
pub struct SimulateArgs {
    /// Difficulty of the automated side (reactive/optimal/adaptive)
    #[arg(long, short = 'd', default_value = "adaptive")]
    pub difficulty: String,

    /// Scripted opponent playing the opening side: random, reactive, optimal
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: String,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Persist the opponent model here; omitted means in-memory only
    #[arg(long)]
    pub model: Option<PathBuf>,
}

/// Scripted stand-in for the human side
#[derive(Debug, Clone, Copy)]
enum Opponent {
    Random,
    Reactive,
    Optimal,
}

impl FromStr for Opponent {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Opponent::Random),
            "reactive" => Ok(Opponent::Reactive),
            "optimal" => Ok(Opponent::Optimal),
            _ => Err(crate::Error::ParseDifficulty {
                input: s.to_string(),
                expected: "random, reactive, optimal".to_string(),
            }),
        }
    }
}

impl Opponent {
    fn name(self) -> &'static str {
        match self {
            Opponent::Random => "random",
            Opponent::Reactive => "reactive",
            Opponent::Optimal => "optimal",
        }
    }

    fn choose_move(
        self,
        board: &crate::tictactoe::BoardState,
        rng: &mut StdRng,
    ) -> crate::Result<usize> {
        match self {
            Opponent::Random => board
                .legal_moves()
                .choose(rng)
                .copied()
                .ok_or(crate::Error::NoMovesAvailable),
            Opponent::Reactive => {
                let model = crate::model::OpponentModel::new();
                policy::choose_move(Difficulty::Reactive, board, &model, &[], rng)
            }
            Opponent::Optimal => search::best_move(board),
        }
    }
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let difficulty = Difficulty::from_str(&args.difficulty)?;
    let opponent = Opponent::from_str(&args.opponent)?;

    match &args.model {
        Some(path) => {
            let session = Session::new(JsonModelRepository::new(), path.clone(), args.seed);
            run(session, difficulty, opponent, &args)
        }
        None => {
            let session = Session::new(InMemoryRepository::new(), "model".into(), args.seed);
            run(session, difficulty, opponent, &args)
        }
    }
}

fn run<R: ModelRepository>(
    mut session: Session<R>,
    difficulty: Difficulty,
    opponent: Opponent,
    args: &SimulateArgs,
) -> Result<()> {
    // Offset so the opponent's stream is independent of the engine's
    let opponent_seed = args.seed.unwrap_or_else(rand::random).wrapping_add(1);
    let mut opponent_rng = StdRng::seed_from_u64(opponent_seed);

    session.select_mode(SessionMode::HumanVsEngine(difficulty));

    let pb = output::create_simulation_progress(args.games as u64);
    for _ in 0..args.games {
        if session.phase() != SessionPhase::Running {
            session.restart();
        }

        while session.phase() == SessionPhase::Running {
            if session.engine_to_move() {
                session.play_engine()?;
            } else {
                let position = opponent.choose_move(session.board(), &mut opponent_rng)?;
                session.play_human(position)?;
            }
        }

        let scores = session.scores();
        pb.set_message(format!(
            "W{} D{} L{}",
            scores.o_wins, scores.draws, scores.x_wins
        ));
        pb.inc(1);
    }
    pb.finish();

    let scores = session.scores();
    let rate = |count: u32| 100.0 * count as f64 / scores.total_games.max(1) as f64;

    output::print_section(&format!(
        "{difficulty} vs {} ({} games)",
        opponent.name(),
        args.games
    ));
    output::print_kv("Engine wins", &format!("{} ({:.1}%)", scores.o_wins, rate(scores.o_wins)));
    output::print_kv("Draws", &format!("{} ({:.1}%)", scores.draws, rate(scores.draws)));
    output::print_kv("Engine losses", &format!("{} ({:.1}%)", scores.x_wins, rate(scores.x_wins)));
    if difficulty == Difficulty::Adaptive {
        output::print_kv(
            "Games learned",
            &session.model().games_learned.to_string(),
        );
        match &args.model {
            Some(path) => output::print_kv("Model", &path.display().to_string()),
            None => output::print_kv("Model", "in-memory only (pass --model to persist)"),
        }
    }

    Ok(())
}
