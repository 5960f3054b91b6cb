//! High score ranking
//!
//! A descending list of past scores, top 10, stored as a plain JSON array.
//! A score is appended each time a main boss falls.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Ranked scores, highest first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    pub scores: Vec<u64>,
}

impl HighScores {
    /// Create empty ranking
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would enter the ranking
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.scores.last().map(|&s| score > s).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.scores.iter().position(|&s| score > s);
        Some(rank.unwrap_or(self.scores.len()) + 1)
    }

    /// Insert a score, keeping the list sorted and trimmed.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn record(&mut self, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.scores.insert(rank - 1, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.scores.first().copied()
    }

    /// Load from `path`. Missing or corrupt files yield an empty ranking.
    pub fn load(path: &Path) -> Self {
        let mut loaded: Self = persistence::load_or_default(path, "high scores");
        // Hand-edited files may be unsorted or long
        loaded.scores.sort_unstable_by(|a, b| b.cmp(a));
        loaded.scores.truncate(MAX_HIGH_SCORES);
        loaded
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.scores.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_descending_order() {
        let mut hs = HighScores::new();
        assert_eq!(hs.record(500), Some(1));
        assert_eq!(hs.record(900), Some(1));
        assert_eq!(hs.record(700), Some(2));
        assert_eq!(hs.scores, vec![900, 700, 500]);
        assert_eq!(hs.top_score(), Some(900));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut hs = HighScores::new();
        assert!(!hs.qualifies(0));
        assert_eq!(hs.record(0), None);
        assert!(hs.is_empty());
    }

    #[test]
    fn test_full_ranking_trims() {
        let mut hs = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            hs.record(s * 100);
        }
        assert!(!hs.qualifies(100));
        assert_eq!(hs.potential_rank(550), Some(6));
        assert_eq!(hs.record(5000), Some(1));
        assert_eq!(hs.scores.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.scores.last(), Some(&200));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut hs = HighScores::new();
        hs.record(30);
        hs.record(10);
        assert_eq!(serde_json::to_string(&hs).unwrap(), "[30,10]");
        let back: HighScores = serde_json::from_str("[5,4]").unwrap();
        assert_eq!(back.scores, vec![5, 4]);
    }

    #[test]
    fn test_load_sorts_hand_edited_file() {
        let dir = std::env::temp_dir().join(format!("dodge-shoot-hs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scores.json");
        std::fs::write(&path, "[1,3,2,9,8,7,6,5,4,10,11,12]").unwrap();
        let hs = HighScores::load(&path);
        assert_eq!(hs.scores.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.top_score(), Some(12));
        assert_eq!(hs.scores.last(), Some(&3));
    }
}
