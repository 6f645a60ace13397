//! High score tracking
//!
//! A single best score: read once at startup, offered each finished run,
//! never decreased.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Best score across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Read the stored best score
    pub fn load(store: &impl ScoreStore) -> Self {
        Self::new(store.read_high_score())
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Offer a finished run's score. Returns true if it became the new best.
    pub fn offer(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Offer a score and persist it if it became the new best
    pub fn offer_and_save(&mut self, score: u32, store: &mut impl ScoreStore) -> bool {
        let improved = self.offer(score);
        if improved {
            store.write_high_score(self.best);
        }
        improved
    }
}
