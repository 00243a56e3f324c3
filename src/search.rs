//! Full-depth minimax search over the 3x3 board.
//!
//! Scores are always taken from the automated side's (`O`'s) perspective:
//! a position where X has won scores [`LOSS_SCORE`], a position where O has
//! won scores [`WIN_SCORE`], and a drawn position scores 0. There is no depth
//! discount, so every forced win scores the same regardless of distance;
//! among equally-scored moves the search keeps the first one encountered in
//! ascending cell-index order.

use crate::{
    Error, Result,
    tictactoe::{BoardState, Player},
};

/// Score of a position where the automated side (O) has won
pub const WIN_SCORE: i32 = 10;

/// Score of a position where the human side (X) has won
pub const LOSS_SCORE: i32 = -10;

/// Evaluate a position from O's perspective.
///
/// Terminal positions score [`WIN_SCORE`], [`LOSS_SCORE`], or 0; non-terminal
/// positions recurse one ply per empty cell and propagate the child scores
/// (O to move maximizes, X to move minimizes). The board handed in is never
/// mutated; every child is a fresh value.
pub fn evaluate(board: &BoardState) -> i32 {
    if let Some(winner) = board.winner() {
        return match winner {
            Player::O => WIN_SCORE,
            Player::X => LOSS_SCORE,
        };
    }
    if board.is_full() {
        return 0;
    }

    let mut best = match board.to_move {
        Player::O => i32::MIN,
        Player::X => i32::MAX,
    };

    for pos in board.empty_positions() {
        let child = board
            .make_move(pos)
            .expect("moves on empty cells cannot fail");
        let value = evaluate(&child);

        best = match board.to_move {
            Player::O => best.max(value),
            Player::X => best.min(value),
        };
    }

    best
}

/// Find the optimal move for the side to move.
///
/// Against this search the automated side can never lose on a 3x3 board.
///
/// # Errors
///
/// Returns `NoMovesAvailable` if the position is terminal or the board is
/// full.
pub fn best_move(board: &BoardState) -> Result<usize> {
    let moves = board.legal_moves();
    let mut candidates = moves.into_iter();
    let first = candidates.next().ok_or(Error::NoMovesAvailable)?;

    let score_of = |pos: usize| {
        let child = board
            .make_move(pos)
            .expect("moves on empty cells cannot fail");
        evaluate(&child)
    };

    let mut best_pos = first;
    let mut best_score = score_of(first);

    for pos in candidates {
        let value = score_of(pos);
        // Strict comparison keeps the first best move in scan order.
        let improves = match board.to_move {
            Player::O => value > best_score,
            Player::X => value < best_score,
        };
        if improves {
            best_pos = pos;
            best_score = value;
        }
    }

    Ok(best_pos)
}
