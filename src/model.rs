//! Opponent model: cross-session record of games against the adaptive
//! difficulty.
//!
//! The model is deliberately simple statistics, not a trained learner: it
//! counts opening moves, memoizes full move sequences by outcome, and keeps
//! the human side's move subsequences for aggregate style classification.
//! It is mutated through exactly one write path ([`OpponentModel::record_outcome`])
//! and persisted synchronously after every mutation by the session.

use std::{collections::VecDeque, fmt};

use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::tictactoe::{CENTER, CORNERS, GameOutcome, Player};

/// Format tag for the persisted model; bumped on incompatible changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Capacity of each outcome-keyed sequence list
pub const SEQUENCE_CAPACITY: usize = 30;

/// Capacity of the player-pattern list
pub const PATTERN_CAPACITY: usize = 50;

/// Completed games required before sequence recall is consulted
pub const MIN_GAMES_FOR_RECALL: u64 = 3;

/// Completed games required before opening-style prediction is consulted
pub const MIN_GAMES_FOR_PREDICTION: u64 = 5;

/// Persistent record of games played against the adaptive difficulty.
///
/// All sequence lists are bounded; the oldest entry is evicted first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentModel {
    pub schema_version: u32,

    /// Occurrence count of each cell index as the human player's first move
    pub opening_counts: [u64; 9],

    /// Full move sequences of games the automated side won
    pub winning_sequences: VecDeque<Vec<usize>>,

    /// Full move sequences of games the automated side lost
    pub losing_sequences: VecDeque<Vec<usize>>,

    /// The human side's move subsequences, for style classification only
    pub player_patterns: VecDeque<Vec<usize>>,

    /// Concluded adaptive games recorded so far
    pub games_learned: u64,
}

impl Default for OpponentModel {
    fn default() -> Self {
        OpponentModel {
            schema_version: SCHEMA_VERSION,
            opening_counts: [0; 9],
            winning_sequences: VecDeque::new(),
            losing_sequences: VecDeque::new(),
            player_patterns: VecDeque::new(),
            games_learned: 0,
        }
    }
}

impl OpponentModel {
    /// Create a fresh model with all counters zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Recommend a move from recorded sequences, if the current game matches
    /// one.
    ///
    /// Losing sequences are consulted first: when the first two moves of the
    /// current game match a stored losing sequence, the recommendation is a
    /// uniformly random empty cell excluding that sequence's third move (the
    /// move that previously led to the loss). Only that single move is
    /// avoided, not every historically bad continuation.
    ///
    /// When no losing-sequence match produces a candidate, winning sequences
    /// are checked the same way: on a two-move prefix match with a sequence
    /// strictly longer than the current game, the sequence's next recorded
    /// move is replayed if it is still available.
    pub fn recommend(
        &self,
        empty_positions: &[usize],
        current_sequence: &[usize],
        rng: &mut impl rand::Rng,
    ) -> Option<usize> {
        if current_sequence.len() < 2 {
            return None;
        }
        let prefix = &current_sequence[..2];

        for sequence in &self.losing_sequences {
            if sequence.len() < 3 || sequence[..2] != *prefix {
                continue;
            }
            let trap = sequence[2];
            let candidates: Vec<usize> = empty_positions
                .iter()
                .copied()
                .filter(|&pos| pos != trap)
                .collect();
            if let Some(&pick) = candidates.choose(rng) {
                return Some(pick);
            }
        }

        for sequence in &self.winning_sequences {
            if sequence.len() <= current_sequence.len() || sequence[..2] != *prefix {
                continue;
            }
            let next = sequence[current_sequence.len()];
            if empty_positions.contains(&next) {
                return Some(next);
            }
        }

        None
    }

    /// Record a concluded game.
    ///
    /// `sequence` is the full move list in play order; the opening side's
    /// moves sit at even indices. `engine` identifies the automated side, so
    /// the sequence lands in the winning or losing list from its perspective.
    /// A draw updates only the pattern list, the opening counter, and
    /// `games_learned`.
    pub fn record_outcome(&mut self, sequence: &[usize], outcome: GameOutcome, engine: Player) {
        let human_moves: Vec<usize> = sequence.iter().copied().step_by(2).collect();
        self.player_patterns.push_back(human_moves);

        if let Some(&opening) = sequence.first() {
            if opening < 9 {
                self.opening_counts[opening] += 1;
            }
        }

        match outcome {
            GameOutcome::Win(winner) if winner == engine => {
                self.winning_sequences.push_back(sequence.to_vec());
            }
            GameOutcome::Win(_) => {
                self.losing_sequences.push_back(sequence.to_vec());
            }
            GameOutcome::Draw => {}
        }

        while self.winning_sequences.len() > SEQUENCE_CAPACITY {
            self.winning_sequences.pop_front();
        }
        while self.losing_sequences.len() > SEQUENCE_CAPACITY {
            self.losing_sequences.pop_front();
        }
        while self.player_patterns.len() > PATTERN_CAPACITY {
            self.player_patterns.pop_front();
        }

        self.games_learned += 1;
    }

    /// Classify the recorded opponent's opening style.
    pub fn classify(&self) -> StyleSummary {
        let mut corners = 0usize;
        let mut centers = 0usize;
        let mut edges = 0usize;

        for pattern in &self.player_patterns {
            match pattern.first() {
                Some(&pos) if CORNERS.contains(&pos) => corners += 1,
                Some(&pos) if pos == CENTER => centers += 1,
                Some(_) => edges += 1,
                None => {}
            }
        }

        let samples = corners + centers + edges;
        if samples == 0 {
            return StyleSummary {
                style: PlayStyle::Unknown,
                corner_pct: 0.0,
                center_pct: 0.0,
                edge_pct: 0.0,
                samples: 0,
            };
        }

        let pct = |count: usize| 100.0 * count as f64 / samples as f64;
        let top = corners.max(centers).max(edges);
        let leaders = [corners, centers, edges]
            .iter()
            .filter(|&&count| count == top)
            .count();

        let style = if leaders > 1 {
            PlayStyle::Mixed
        } else if top == corners {
            PlayStyle::CornerPreferring
        } else if top == centers {
            PlayStyle::CenterPreferring
        } else {
            PlayStyle::EdgePreferring
        };

        StyleSummary {
            style,
            corner_pct: pct(corners),
            center_pct: pct(centers),
            edge_pct: pct(edges),
            samples,
        }
    }

    /// The human player's most frequent opening move, if any has been seen.
    ///
    /// Ties resolve to the lowest cell index.
    pub fn predicted_opening(&self) -> Option<usize> {
        let (pos, &count) = self
            .opening_counts
            .iter()
            .enumerate()
            .max_by_key(|&(pos, &count)| (count, std::cmp::Reverse(pos)))?;
        if count == 0 { None } else { Some(pos) }
    }

    /// Structural validation of a loaded model.
    ///
    /// # Errors
    ///
    /// Returns `CorruptModel` on a schema version mismatch, an out-of-range
    /// recorded index, or an over-capacity list.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let corrupt = |reason: String| crate::Error::CorruptModel { reason };

        if self.schema_version != SCHEMA_VERSION {
            return Err(corrupt(format!(
                "schema version {} does not match expected {}",
                self.schema_version, SCHEMA_VERSION
            )));
        }

        let lists = [
            ("winning_sequences", &self.winning_sequences),
            ("losing_sequences", &self.losing_sequences),
            ("player_patterns", &self.player_patterns),
        ];
        for (name, list) in lists {
            for sequence in list {
                if let Some(&bad) = sequence.iter().find(|&&pos| pos >= 9) {
                    return Err(corrupt(format!(
                        "{name} contains out-of-range cell index {bad}"
                    )));
                }
                if sequence.len() > 9 {
                    return Err(corrupt(format!(
                        "{name} contains a sequence of {} moves",
                        sequence.len()
                    )));
                }
            }
        }

        if self.winning_sequences.len() > SEQUENCE_CAPACITY
            || self.losing_sequences.len() > SEQUENCE_CAPACITY
        {
            return Err(corrupt("sequence list exceeds capacity".to_string()));
        }
        if self.player_patterns.len() > PATTERN_CAPACITY {
            return Err(corrupt("pattern list exceeds capacity".to_string()));
        }

        Ok(())
    }
}

/// Aggregate opening-style label derived from recorded patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayStyle {
    CornerPreferring,
    CenterPreferring,
    EdgePreferring,
    Mixed,
    Unknown,
}

impl fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayStyle::CornerPreferring => "corner-preferring",
            PlayStyle::CenterPreferring => "center-preferring",
            PlayStyle::EdgePreferring => "edge-preferring",
            PlayStyle::Mixed => "mixed",
            PlayStyle::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Style classification with per-category percentages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSummary {
    pub style: PlayStyle,
    pub corner_pct: f64,
    pub center_pct: f64,
    pub edge_pct: f64,
    pub samples: usize,
}

impl fmt::Display for StyleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.style == PlayStyle::Unknown {
            return f.write_str("unknown (no recorded games)");
        }
        write!(
            f,
            "{} (corners {:.0}%, center {:.0}%, edges {:.0}%, {} games)",
            self.style, self.corner_pct, self.center_pct, self.edge_pct, self.samples
        )
    }
}
