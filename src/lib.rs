//! OXO - noughts-and-crosses engine with an adaptive automated opponent
//!
//! This crate provides:
//! - Complete 3x3 Tic-Tac-Toe game implementation with validation
//! - Full-depth minimax search for provably optimal play
//! - A tiered difficulty policy (reactive heuristic, optimal, adaptive)
//! - A persistent opponent model that records game histories and biases
//!   move selection against a specific opponent
//! - A session controller orchestrating turns, scores, and learning

pub mod adapters;
pub mod cli;
pub mod error;
pub mod model;
pub mod policy;
pub mod ports;
pub mod search;
pub mod session;
pub mod tictactoe;

pub use error::{Error, Result};
pub use model::{OpponentModel, PlayStyle, StyleSummary};
pub use policy::Difficulty;
pub use session::{ENGINE_PLAYER, ScoreBoard, Session, SessionMode, SessionPhase, TurnReport};
pub use tictactoe::{BoardState, Cell, Game, GameOutcome, Move, Player};
