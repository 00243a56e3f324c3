//! Game session controller.
//!
//! Owns the board, the score counters, and the opponent model, and drives
//! the turn loop: human input is validated and applied, the policy picks the
//! automated side's reply, and terminal states update scores and teach the
//! model. The session is the only writer of all of that state; there is a
//! single logical thread of control and no locking.

use std::{path::PathBuf, thread, time::Duration};

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Error, Result,
    model::OpponentModel,
    policy::{self, Difficulty},
    ports::ModelRepository,
    tictactoe::{BoardState, Game, GameOutcome, Player},
};

/// The automated side. The human always opens as X.
pub const ENGINE_PLAYER: Player = Player::O;

/// What the session is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting on the mode-selection screen
    MenuSelection,
    /// A game is in progress
    Running,
    /// The current game has concluded
    Ended(GameOutcome),
}

/// How the session is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Two humans sharing the board; no policy, no learning
    HumanVsHuman,
    /// A human (X) against the automated side (O)
    HumanVsEngine(Difficulty),
}

/// Cumulative counters for the current session.
///
/// These survive restarts and reset only on an explicit return to the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    pub total_games: u32,
}

impl ScoreBoard {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome.winner() {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
        self.total_games += 1;
    }
}

/// Result of one applied move, for the display collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub position: usize,
    pub player: Player,
    /// Set when this move concluded the game
    pub outcome: Option<GameOutcome>,
    /// The completed line's triple, for drawing the overlay segment
    pub winning_line: Option<[usize; 3]>,
}

/// Interactive game session against the automated opponent.
///
/// The opponent model is loaded once at construction; an absent or corrupt
/// store yields a fresh model. A save failure is logged and ignored; the
/// session keeps playing with the in-memory model.
pub struct Session<R: ModelRepository> {
    repository: R,
    model_path: PathBuf,
    model: OpponentModel,
    mode: SessionMode,
    phase: SessionPhase,
    game: Game,
    scores: ScoreBoard,
    pacing: Option<Duration>,
    rng: StdRng,
}

impl<R: ModelRepository> Session<R> {
    /// Create a session on the mode-selection screen.
    ///
    /// `seed` fixes the RNG for reproducible runs; `None` seeds from entropy.
    pub fn new(repository: R, model_path: PathBuf, seed: Option<u64>) -> Self {
        let model = match repository.load(&model_path) {
            Ok(Some(model)) => model,
            Ok(None) => OpponentModel::new(),
            Err(e) => {
                log::warn!("starting with a fresh opponent model: {e}");
                OpponentModel::new()
            }
        };

        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };

        Session {
            repository,
            model_path,
            model,
            mode: SessionMode::HumanVsEngine(Difficulty::Reactive),
            phase: SessionPhase::MenuSelection,
            game: Game::new(),
            scores: ScoreBoard::default(),
            pacing: None,
            rng,
        }
    }

    /// Optional presentational delay before each automated move.
    ///
    /// Unset (the default) means the engine replies immediately; tests and
    /// headless runs leave it unset without changing any outcome.
    pub fn set_pacing(&mut self, pacing: Option<Duration>) {
        self.pacing = pacing;
    }

    /// Leave the menu and start the first game in the given mode.
    pub fn select_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
        self.scores = ScoreBoard::default();
        self.begin_game();
    }

    /// Start the next game, keeping mode and scores.
    pub fn restart(&mut self) {
        self.begin_game();
    }

    fn begin_game(&mut self) {
        self.game = Game::new();
        self.phase = SessionPhase::Running;
    }

    /// Return to the mode-selection screen.
    ///
    /// Discards the in-progress game and resets all session counters. The
    /// opponent model is untouched; mid-game state never teaches it. Any
    /// pending automated move is abandoned with the game.
    pub fn exit_to_menu(&mut self) {
        self.game = Game::new();
        self.scores = ScoreBoard::default();
        self.phase = SessionPhase::MenuSelection;
    }

    /// Apply a human move at `position`.
    ///
    /// # Errors
    ///
    /// Returns `GameEnded` when no game is running and `InvalidMove` for an
    /// occupied or out-of-bounds cell. Both are boundary errors the caller
    /// reports and ignores; session state is unchanged.
    pub fn play_human(&mut self, position: usize) -> Result<TurnReport> {
        if self.phase != SessionPhase::Running {
            return Err(Error::GameEnded);
        }
        self.apply_move(position)
    }

    /// True when a game is running and it is the automated side's turn.
    pub fn engine_to_move(&self) -> bool {
        self.phase == SessionPhase::Running
            && matches!(self.mode, SessionMode::HumanVsEngine(_))
            && self.game.board.to_move == ENGINE_PLAYER
    }

    /// Let the automated side take its turn.
    ///
    /// # Errors
    ///
    /// Returns `GameEnded` when it is not the automated side's turn.
    pub fn play_engine(&mut self) -> Result<TurnReport> {
        let SessionMode::HumanVsEngine(difficulty) = self.mode else {
            return Err(Error::GameEnded);
        };
        if !self.engine_to_move() {
            return Err(Error::GameEnded);
        }

        if let Some(delay) = self.pacing {
            thread::sleep(delay);
        }

        let history = self.game.positions();
        let position = policy::choose_move(
            difficulty,
            &self.game.board,
            &self.model,
            &history,
            &mut self.rng,
        )?;
        self.apply_move(position)
    }

    fn apply_move(&mut self, position: usize) -> Result<TurnReport> {
        let player = self.game.board.to_move;
        self.game.play(position)?;

        let outcome = self.game.outcome;
        if let Some(outcome) = outcome {
            self.settle(outcome);
        }

        Ok(TurnReport {
            position,
            player,
            outcome,
            winning_line: self.game.board.winning_line(),
        })
    }

    /// Conclude the current game: update scores and, for adaptive games,
    /// teach and persist the opponent model.
    fn settle(&mut self, outcome: GameOutcome) {
        self.phase = SessionPhase::Ended(outcome);
        self.scores.record(outcome);

        if self.mode != SessionMode::HumanVsEngine(Difficulty::Adaptive) {
            return;
        }

        let sequence = self.game.positions();
        self.model.record_outcome(&sequence, outcome, ENGINE_PLAYER);

        if let Err(e) = self.repository.save(&self.model, &self.model_path) {
            // Non-fatal: the next game end is the next write point
            log::warn!("failed to persist opponent model: {e}");
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.game.board
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    pub fn model(&self) -> &OpponentModel {
        &self.model
    }
}
