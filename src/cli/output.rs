//! Output formatting and progress bars for the CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    session::ScoreBoard,
    tictactoe::{BoardState, Cell},
};

/// Render the board for the terminal.
///
/// Empty cells show their index so the player can type it directly.
pub fn render_board(board: &BoardState) -> String {
    let glyph = |pos: usize| match board.get(pos) {
        Cell::Empty => char::from_digit(pos as u32, 10).unwrap_or('?'),
        Cell::X => 'X',
        Cell::O => 'O',
    };

    let mut out = String::new();
    for row in 0..3 {
        let base = row * 3;
        out.push_str(&format!(
            " {} | {} | {}\n",
            glyph(base),
            glyph(base + 1),
            glyph(base + 2)
        ));
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

/// Describe a completed win-line by its endpoints, the two cells the display
/// overlay connects.
pub fn describe_win_line(line: [usize; 3]) -> String {
    format!("cells {} through {}", line[0], line[2])
}

/// One-line score summary
pub fn score_line(scores: ScoreBoard) -> String {
    format!(
        "X {} - O {} (draws {}, games {})",
        scores.x_wins, scores.o_wins, scores.draws, scores.total_games
    )
}

/// Create a progress bar for headless simulation
pub fn create_simulation_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_board_shows_indices_and_marks() {
        let board = BoardState::from_string("X...O....").unwrap();
        let rendered = render_board(&board);
        assert!(rendered.starts_with(" X | 1 | 2"));
        assert!(rendered.contains(" 3 | O | 5"));
    }

    #[test]
    fn test_describe_win_line_uses_endpoints() {
        assert_eq!(describe_win_line([0, 4, 8]), "cells 0 through 8");
    }
}
