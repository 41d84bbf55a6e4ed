//! High score leaderboard
//!
//! Persisted as a JSON file, tracks the top 10 scores. Persistence failure
//! is never fatal: the game continues with in-memory scores and a warning.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score (if it qualifies). Returns the rank achieved,
    /// 1-indexed.
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            timestamp,
        };

        // Insertion point, sorted descending by score
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard from a JSON file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = fs::read_to_string(path)?;
        let scores: HighScores = serde_json::from_str(&json)?;
        log::info!("Loaded {} high scores from {}", scores.entries.len(), path.display());
        Ok(scores)
    }

    /// Load the leaderboard, warning and starting fresh on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("{e}; starting with an empty leaderboard");
                Self::new()
            }
        }
    }

    /// Save the leaderboard to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
