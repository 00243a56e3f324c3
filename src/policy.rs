//! Tiered difficulty policy for the automated side.
//!
//! Each difficulty is a move source with its own priority order:
//!
//! - [`Difficulty::Reactive`] plays a fallible one-ply heuristic.
//! - [`Difficulty::Optimal`] delegates every move to the exact search.
//! - [`Difficulty::Adaptive`] blends forced-line detection, opponent-model
//!   recall, opening-style prediction, and the exact search as fallback.
//!
//! All randomness flows through the injected RNG so a seeded run is fully
//! reproducible.

use std::{fmt, str::FromStr};

use rand::prelude::IndexedRandom;

use crate::{
    Error, Result,
    model::{MIN_GAMES_FOR_PREDICTION, MIN_GAMES_FOR_RECALL, OpponentModel},
    search,
    tictactoe::{BoardState, CENTER, CORNERS, LineAnalyzer},
};

/// Probability that the reactive tier blocks an opponent's immediate win.
///
/// The 20% miss rate is deliberate; it is what keeps the tier beatable.
pub const REACTIVE_BLOCK_PROBABILITY: f64 = 0.8;

/// The automated opponent's difficulty tier, fixed for the duration of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// One-ply heuristic with a deliberate blocking miss rate
    Reactive,
    /// Perfect play via exact search
    Optimal,
    /// Opponent-model-guided play with exact-search fallback
    Adaptive,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Reactive => "reactive",
            Difficulty::Optimal => "optimal",
            Difficulty::Adaptive => "adaptive",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalised = s.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "reactive" | "easy" => Ok(Difficulty::Reactive),
            "optimal" | "medium" => Ok(Difficulty::Optimal),
            "adaptive" | "hard" => Ok(Difficulty::Adaptive),
            _ => Err(Error::ParseDifficulty {
                input: s.to_string(),
                expected: "reactive/easy, optimal/medium, adaptive/hard".to_string(),
            }),
        }
    }
}

/// Choose a move for the side to move under the given difficulty.
///
/// `history` is the current game's move sequence in play order; only the
/// adaptive tier consults it (and the opponent model).
///
/// # Errors
///
/// Returns `NoMovesAvailable` if the position is terminal.
pub fn choose_move(
    difficulty: Difficulty,
    board: &BoardState,
    model: &OpponentModel,
    history: &[usize],
    rng: &mut impl rand::Rng,
) -> Result<usize> {
    match difficulty {
        Difficulty::Reactive => reactive_move(board, rng),
        Difficulty::Optimal => search::best_move(board),
        Difficulty::Adaptive => adaptive_move(board, model, history, rng),
    }
}

/// One-ply heuristic move selection.
///
/// Priority order: take an immediate win; block the opponent's immediate win
/// (with probability [`REACTIVE_BLOCK_PROBABILITY`]); take the center; take a
/// random free corner; take a random free cell. The win and block rules test
/// each empty cell by placing the mark on a scratch copy and checking the
/// win-line predicate.
fn reactive_move(board: &BoardState, rng: &mut impl rand::Rng) -> Result<usize> {
    let empty = board.legal_moves();
    if empty.is_empty() {
        return Err(Error::NoMovesAvailable);
    }

    let me = board.to_move;
    let opponent = me.opponent();

    if let Some(pos) = hypothetical_win(board, &empty, me) {
        return Ok(pos);
    }

    if let Some(pos) = hypothetical_win(board, &empty, opponent) {
        if rng.random_bool(REACTIVE_BLOCK_PROBABILITY) {
            return Ok(pos);
        }
    }

    if board.is_empty(CENTER) {
        return Ok(CENTER);
    }

    let free_corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&pos| board.is_empty(pos))
        .collect();
    if let Some(&pos) = free_corners.choose(rng) {
        return Ok(pos);
    }

    empty.choose(rng).copied().ok_or(Error::NoMovesAvailable)
}

/// Find a cell that completes a line for `player` by trying each empty cell
/// on a scratch copy of the board.
fn hypothetical_win(
    board: &BoardState,
    empty: &[usize],
    player: crate::tictactoe::Player,
) -> Option<usize> {
    for &pos in empty {
        let mut cells = board.cells;
        cells[pos] = player.to_cell();
        if LineAnalyzer::has_won(&cells, player) {
            return Some(pos);
        }
    }
    None
}

/// Opponent-model-guided move selection.
///
/// Fallback chain, evaluated fresh each turn:
/// 1. Take an immediate winning cell.
/// 2. Block the opponent's immediate winning cell.
/// 3. With at least [`MIN_GAMES_FOR_RECALL`] recorded games, play the model's
///    sequence recommendation.
/// 4. With at least [`MIN_GAMES_FOR_PREDICTION`] recorded games, counter the
///    opponent's predicted opening style.
/// 5. Fall back to the exact search.
///
/// Steps 1-2 scan the full win-line table, so a forced win or forced block is
/// never missed.
fn adaptive_move(
    board: &BoardState,
    model: &OpponentModel,
    history: &[usize],
    rng: &mut impl rand::Rng,
) -> Result<usize> {
    if board.legal_moves().is_empty() {
        return Err(Error::NoMovesAvailable);
    }

    let me = board.to_move;

    if let Some(pos) = LineAnalyzer::winning_move(&board.cells, me) {
        return Ok(pos);
    }

    if let Some(pos) = LineAnalyzer::winning_move(&board.cells, me.opponent()) {
        return Ok(pos);
    }

    if model.games_learned >= MIN_GAMES_FOR_RECALL {
        if let Some(pos) = model.recommend(&board.empty_positions(), history, rng) {
            return Ok(pos);
        }
    }

    if model.games_learned >= MIN_GAMES_FOR_PREDICTION {
        if let Some(pos) = counter_predicted_opening(board, model) {
            return Ok(pos);
        }
    }

    search::best_move(board)
}

/// Counter the opponent's statistically preferred opening.
///
/// A predicted corner is mirrored by the center or, failing that, the
/// geometrically opposite corner; a predicted center is answered with a free
/// corner; a predicted edge is answered with the center. Returns `None` when
/// no counter-cell is free, letting the caller fall through to the search.
fn counter_predicted_opening(board: &BoardState, model: &OpponentModel) -> Option<usize> {
    let predicted = model.predicted_opening()?;

    if CORNERS.contains(&predicted) {
        if board.is_empty(CENTER) {
            return Some(CENTER);
        }
        let opposite = 8 - predicted;
        if board.is_empty(opposite) {
            return Some(opposite);
        }
        return None;
    }

    if predicted == CENTER {
        return CORNERS.iter().copied().find(|&pos| board.is_empty(pos));
    }

    if board.is_empty(CENTER) {
        return Some(CENTER);
    }
    None
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tictactoe::{GameOutcome, Player};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_difficulty_parsing_accepts_aliases() {
        assert_eq!("reactive".parse::<Difficulty>().unwrap(), Difficulty::Reactive);
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Reactive);
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Optimal);
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Adaptive);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_display_uses_canonical_names() {
        assert_eq!(Difficulty::Adaptive.to_string(), "adaptive");
    }

    #[test]
    fn test_reactive_takes_win_on_column() {
        // O completes the left column at 6
        // OXX
        // O.X
        // ...
        let board = BoardState::from_string("OXXO.X..._O").unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pos = reactive_move(&board, &mut rng).unwrap();
            assert_eq!(pos, 6);
        }
    }

    #[test]
    fn test_reactive_prefers_win_over_block() {
        // Both sides have an open line; O must finish its own
        // XX.
        // OO.
        // ..X
        let board = BoardState::from_string("XX.OO...X_O").unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(reactive_move(&board, &mut rng).unwrap(), 5);
        }
    }

    #[test]
    fn test_reactive_takes_center_when_quiet() {
        // No wins or threats on the board, center free
        let board = BoardState::from_string("X........").unwrap();
        let mut rng = rng();
        assert_eq!(reactive_move(&board, &mut rng).unwrap(), CENTER);
    }

    #[test]
    fn test_reactive_falls_back_to_corner() {
        // Quiet board, center taken: the move must be a free corner
        let board = BoardState::from_string("....X...._O").unwrap();
        let mut rng = rng();
        let pos = reactive_move(&board, &mut rng).unwrap();
        assert!(CORNERS.contains(&pos));
    }

    #[test]
    fn test_adaptive_never_misses_forced_win() {
        let board = BoardState::from_string("OO.XX.X.._O").unwrap();
        let model = OpponentModel::new();
        let mut rng = rng();
        assert_eq!(adaptive_move(&board, &model, &[], &mut rng).unwrap(), 2);
    }

    #[test]
    fn test_adaptive_blocks_forced_loss() {
        let board = BoardState::from_string("XX..O...._O").unwrap();
        let model = OpponentModel::new();
        let mut rng = rng();
        assert_eq!(adaptive_move(&board, &model, &[], &mut rng).unwrap(), 2);
    }

    #[test]
    fn test_adaptive_consults_model_after_enough_games() {
        let mut model = OpponentModel::new();
        // Three recorded games unlock recall; one of them is a win whose
        // continuation should be replayed.
        model.record_outcome(&[0, 4, 8, 2, 6, 5], GameOutcome::Win(Player::O), Player::O);
        model.record_outcome(&[1, 4, 7, 0, 5], GameOutcome::Draw, Player::O);
        model.record_outcome(&[2, 4, 6, 1, 5], GameOutcome::Draw, Player::O);

        // Current game matches the winning sequence prefix [0, 4]; quiet
        // board, no forced lines.
        let board = BoardState::from_string("X...O...._O").unwrap();
        let mut rng = rng();
        let pos = adaptive_move(&board, &model, &[0, 4], &mut rng).unwrap();
        assert_eq!(pos, 8);
    }

    #[test]
    fn test_adaptive_ignores_model_below_threshold() {
        let mut model = OpponentModel::new();
        model.record_outcome(&[0, 4, 8, 2, 6, 5], GameOutcome::Win(Player::O), Player::O);

        let board = BoardState::from_string("X...O...._O").unwrap();
        let mut rng = rng();
        let pos = adaptive_move(&board, &model, &[0, 4], &mut rng).unwrap();
        // Below the recall threshold the tier plays the exact search instead
        assert_eq!(pos, search::best_move(&board).unwrap());
    }

    #[test]
    fn test_adaptive_falls_back_to_search_on_fresh_model() {
        let model = OpponentModel::new();
        let board = BoardState::new().make_move(0).unwrap();
        let mut rng = rng();
        let pos = adaptive_move(&board, &model, &[0], &mut rng).unwrap();
        assert_eq!(pos, search::best_move(&board).unwrap());
    }

    #[test]
    fn test_counter_prediction_mirrors_corner_with_center() {
        let mut model = OpponentModel::new();
        for _ in 0..MIN_GAMES_FOR_PREDICTION {
            model.record_outcome(&[0, 4, 5, 2, 7], GameOutcome::Draw, Player::O);
        }

        let board = BoardState::new();
        assert_eq!(counter_predicted_opening(&board, &model), Some(CENTER));
    }

    #[test]
    fn test_counter_prediction_uses_opposite_corner_when_center_taken() {
        let mut model = OpponentModel::new();
        for _ in 0..MIN_GAMES_FOR_PREDICTION {
            model.record_outcome(&[2, 4, 5, 0, 7], GameOutcome::Draw, Player::O);
        }

        // Center occupied; corner 2 predicted, so its mirror is 6
        let board = BoardState::from_string("....X...._O").unwrap();
        assert_eq!(counter_predicted_opening(&board, &model), Some(6));
    }
}
