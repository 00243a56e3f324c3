//! Winning line analysis for the 3x3 board

use super::{Cell, Player};

/// Winning line indices on the 3x3 board.
///
/// The scan order is fixed (rows, columns, diagonals) so that line reporting
/// is deterministic and the display collaborator always draws the same
/// segment for a given final position.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Find the first completed line in table order, with its owner.
    pub fn completed_line(cells: &[Cell; 9]) -> Option<([usize; 3], Player)> {
        for &line in &WINNING_LINES {
            let first = cells[line[0]];
            if first != Cell::Empty && line.iter().all(|&idx| cells[idx] == first) {
                return Some((line, first.to_player()?));
            }
        }
        None
    }

    /// Find the first position that would immediately win for the player.
    ///
    /// Lines are scanned in table order, so the result is deterministic for a
    /// given board.
    pub fn winning_move(cells: &[Cell; 9], player: Player) -> Option<usize> {
        WINNING_LINES
            .iter()
            .find_map(|line| Self::winning_move_in_line(cells, player, line))
    }

    /// Find the winning move position in a specific line, if one exists
    fn winning_move_in_line(cells: &[Cell; 9], player: Player, line: &[usize; 3]) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        // More than one empty cell, not a winning move
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None, // Opponent piece in line
            }
        }

        if count == 2 { empty_pos } else { None }
    }
}
