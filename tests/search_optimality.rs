//! Optimality guarantees of the exact search.
//!
//! Validates the classic 3x3 results: perfect play never loses, and two
//! perfect players always draw.

use oxo::{
    search,
    tictactoe::{BoardState, Player},
};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

fn random_move(board: &BoardState, rng: &mut StdRng) -> usize {
    *board
        .legal_moves()
        .choose(rng)
        .expect("non-terminal board has moves")
}

#[test]
fn optimal_vs_optimal_always_draws() {
    let mut board = BoardState::new();
    while !board.is_terminal() {
        let pos = search::best_move(&board).unwrap();
        board = board.make_move(pos).unwrap();
    }

    assert!(board.is_draw(), "perfect play should draw:\n{board}");
}

#[test]
fn optimal_second_player_never_loses_to_random() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = BoardState::new();

        while !board.is_terminal() {
            let pos = match board.to_move {
                Player::X => random_move(&board, &mut rng),
                Player::O => search::best_move(&board).unwrap(),
            };
            board = board.make_move(pos).unwrap();
        }

        assert_ne!(
            board.winner(),
            Some(Player::X),
            "search lost as O with seed {seed}:\n{board}"
        );
    }
}

#[test]
fn optimal_opening_player_never_loses_to_random() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = BoardState::new();

        while !board.is_terminal() {
            let pos = match board.to_move {
                Player::X => search::best_move(&board).unwrap(),
                Player::O => random_move(&board, &mut rng),
            };
            board = board.make_move(pos).unwrap();
        }

        assert_ne!(
            board.winner(),
            Some(Player::O),
            "search lost as X with seed {seed}:\n{board}"
        );
    }
}

#[test]
fn search_only_ever_returns_empty_cells() {
    // Random playouts, probing the search at every intermediate position
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(1000 + seed);
        let mut board = BoardState::new().make_move(4).unwrap();

        while !board.is_terminal() {
            let pos = search::best_move(&board).unwrap();
            assert!(
                board.is_empty(pos),
                "search returned occupied cell {pos} with seed {seed}:\n{board}"
            );

            board = board.make_move(random_move(&board, &mut rng)).unwrap();
        }
    }
}
