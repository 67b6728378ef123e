//! High score leaderboard system
//!
//! Top 10 finished runs, sorted by score descending. Persisted as a JSON
//! array of `{name, score}` records under the `high_scores` key.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name as typed
    pub name: String,
    pub score: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "high_scores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a finished run, keeping the board sorted and truncated.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending; ties go behind older entries)
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

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// One line per entry, `" 1. name ....... score"`
    pub fn format_board(&self) -> String {
        if self.is_empty() {
            return "No scores yet".to_string();
        }
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{:>2}. {:<15} {:>7}", i + 1, e.name, e.score))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Restore ordering and size after loading foreign data
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Load the leaderboard. Missing or malformed data yields an empty board.
    pub fn load(storage: &dyn Storage) -> Self {
        let json = match storage.load(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                return Self::new();
            }
            Err(e) => {
                log::warn!("Could not read high scores, starting fresh: {e:#}");
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("High score data is malformed, starting fresh: {e}");
                Self::new()
            }
        }
    }

    /// Overwrite the stored leaderboard. Write failures are returned to the caller.
    pub fn save(&self, storage: &mut dyn Storage) -> anyhow::Result<()> {
        let json = serde_json::to_string(self).context("failed to encode high scores")?;
        storage
            .store(Self::STORAGE_KEY, &json)
            .context("failed to save high scores")?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use proptest::prelude::*;

    #[test]
    fn test_record_sorts_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record("ann", 50), Some(1));
        assert_eq!(scores.record("bob", 120), Some(1));
        assert_eq!(scores.record("cy", 80), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![120, 80, 50]);
        assert_eq!(scores.top_score(), Some(120));
    }

    #[test]
    fn test_ties_rank_behind_existing() {
        let mut scores = HighScores::new();
        scores.record("first", 100);
        assert_eq!(scores.record("second", 100), Some(2));
        assert_eq!(scores.entries[0].name, "first");
    }

    #[test]
    fn test_zero_score_still_recorded() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record("crash", 0), Some(1));
        assert_eq!(scores.entries.len(), 1);
    }

    #[test]
    fn test_truncates_to_ten() {
        let mut scores = HighScores::new();
        for i in 0..10 {
            scores.record("p", 100 + i);
        }
        assert_eq!(scores.record("low", 5), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.record("high", 1000), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(101));
    }

    #[test]
    fn test_persisted_format_is_plain_array() {
        let mut scores = HighScores::new();
        scores.record("ann", 30);
        let mut storage = MemoryStorage::new();
        scores.save(&mut storage).unwrap();
        assert_eq!(
            storage.get(HighScores::STORAGE_KEY),
            Some(r#"[{"name":"ann","score":30}]"#)
        );
        assert_eq!(HighScores::load(&storage), scores);
    }

    #[test]
    fn test_format_board() {
        let mut scores = HighScores::new();
        assert_eq!(scores.format_board(), "No scores yet");
        scores.record("ann", 30);
        scores.record("bob", 120);
        let board = scores.format_board();
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1. bob"));
        assert!(lines[1].ends_with("30"));
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage = MemoryStorage::new();
        assert!(HighScores::load(&storage).is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.store(HighScores::STORAGE_KEY, "{not json").unwrap();
        assert!(HighScores::load(&storage).is_empty());
    }

    #[test]
    fn test_load_normalizes_foreign_data() {
        let mut storage = MemoryStorage::new();
        let raw: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"name":"n{i}","score":{i}}}"#))
            .collect();
        storage
            .store(HighScores::STORAGE_KEY, &format!("[{}]", raw.join(",")))
            .unwrap();
        let scores = HighScores::load(&storage);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(11));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut storage = MemoryStorage::read_only();
        assert!(HighScores::new().save(&mut storage).is_err());
    }

    proptest! {
        #[test]
        fn prop_board_sorted_and_bounded(runs in proptest::collection::vec(0u64..10_000, 0..40)) {
            let mut scores = HighScores::new();
            let mut storage = MemoryStorage::new();
            for score in runs {
                scores.record("p", score);
                scores.save(&mut storage).unwrap();
                let saved = HighScores::load(&storage);
                prop_assert!(saved.entries.len() <= MAX_HIGH_SCORES);
                prop_assert!(saved.entries.windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }
}
