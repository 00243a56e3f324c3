//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// The winning player, if the game was not drawn
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub board: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the empty position
    pub fn new() -> Self {
        Game {
            board: BoardState::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for the side to move
    ///
    /// # Errors
    ///
    /// Returns `GameEnded` once the outcome is decided, or `InvalidMove` for
    /// an occupied or out-of-bounds position.
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameEnded);
        }

        let player = self.board.to_move;
        self.board = self.board.make_move(position)?;
        self.moves.push(Move { position, player });

        if let Some(winner) = self.board.winner() {
            self.outcome = Some(GameOutcome::Win(winner));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        Ok(())
    }

    /// The move sequence so far, as cell indices in play order
    pub fn positions(&self) -> Vec<usize> {
        self.moves.iter().map(|m| m.position).collect()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_records_history_in_order() {
        let mut game = Game::new();
        game.play(4).unwrap();
        game.play(0).unwrap();
        game.play(8).unwrap();

        assert_eq!(game.positions(), vec![4, 0, 8]);
        assert_eq!(game.moves[0].player, Player::X);
        assert_eq!(game.moves[1].player, Player::O);
        assert!(game.outcome.is_none());
    }

    #[test]
    fn test_win_sets_outcome_and_locks_game() {
        let mut game = Game::new();
        // X: 0, 1, 2 wins the top row
        for &pos in &[0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }

        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert!(matches!(game.play(5), Err(crate::Error::GameEnded)));
    }

    #[test]
    fn test_drawn_game() {
        let mut game = Game::new();
        for &pos in &[0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.play(pos).unwrap();
        }

        assert_eq!(game.outcome, Some(GameOutcome::Draw));
    }

    #[test]
    fn test_invalid_move_leaves_game_untouched() {
        let mut game = Game::new();
        game.play(4).unwrap();

        assert!(matches!(
            game.play(4),
            Err(crate::Error::InvalidMove { position: 4 })
        ));
        assert_eq!(game.positions(), vec![4]);
        assert_eq!(game.board.to_move, Player::O);
    }
}
