//! High score leaderboard
//!
//! Keeps the ten best finished rounds. Kept in memory; the host decides
//! whether to store the JSON form anywhere.

use serde::{Deserialize, Serialize};

use crate::session::SummaryRecorder;
use crate::sim::RoundSummary;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u8,
    pub xp: u32,
    /// Exact matches in the round
    pub matches: u32,
}

impl From<&RoundSummary> for HighScoreEntry {
    fn from(summary: &RoundSummary) -> Self {
        Self {
            score: summary.score,
            level: summary.level,
            xp: summary.xp,
            matches: summary.matches,
        }
    }
}

/// Leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// A scoreless round never places; otherwise it must beat the lowest
    /// entry once the board is full.
    pub fn qualifies(&self, score: u64) -> bool {
        let has_room = self.entries.len() < MAX_HIGH_SCORES;
        score > 0 && (has_room || self.entries.iter().any(|e| score > e.score))
    }

    /// Add a round (if it qualifies). Returns the rank achieved, 1-indexed.
    /// Equal scores rank behind the rounds already on the board.
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let slot = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(slot, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

impl SummaryRecorder for HighScores {
    fn record(&mut self, summary: &RoundSummary) {
        if let Some(rank) = self.add(HighScoreEntry::from(summary)) {
            log::info!("New high score #{}: {}", rank, summary.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            level: 1,
            xp: 0,
            matches: 0,
        }
    }

    #[test]
    fn test_zero_score_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(entry(0)), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_insert_and_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(entry(50)), Some(1));
        assert_eq!(scores.add(entry(100)), Some(1));
        assert_eq!(scores.add(entry(70)), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![100, 70, 50]);
        assert_eq!(scores.top_score(), Some(100));
    }

    #[test]
    fn test_full_board_trims() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add(entry(s * 10));
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add(entry(5)), None);
        assert_eq!(scores.add(entry(1000)), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().unwrap().score, 20);
    }

    #[test]
    fn test_records_summaries() {
        let mut scores = HighScores::new();
        let summary = RoundSummary {
            score: 120,
            level: 2,
            streak: 2,
            matches: 12,
            xp: 12,
        };
        scores.record(&summary);
        assert_eq!(scores.entries, vec![HighScoreEntry::from(&summary)]);
    }

    #[test]
    fn test_equal_score_ranks_behind_existing() {
        let mut scores = HighScores::new();
        let first = HighScoreEntry { matches: 1, ..entry(40) };
        let second = HighScoreEntry { matches: 2, ..entry(40) };
        assert_eq!(scores.add(first.clone()), Some(1));
        assert_eq!(scores.add(entry(90)), Some(1));
        assert_eq!(scores.add(second.clone()), Some(3));
        assert_eq!(scores.entries[1], first);
        assert_eq!(scores.entries[2], second);
    }

    #[test]
    fn test_full_board_rejects_tie_with_lowest() {
        let mut scores = HighScores::new();
        for _ in 0..MAX_HIGH_SCORES {
            scores.add(entry(30));
        }
        assert!(!scores.qualifies(30));
        assert_eq!(scores.add(entry(30)), None);
        assert_eq!(scores.add(entry(31)), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_json_form() {
        let mut scores = HighScores::new();
        scores.add(entry(25));
        let json = scores.to_json().unwrap();
        let restored: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.entries, scores.entries);
    }
}
