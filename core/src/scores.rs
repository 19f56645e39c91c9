use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::Difficulty;

/// One completed game on a leaderboard. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Display name of the tier the game was played on
    pub difficulty: String,
    pub moves: u32,
    /// Final game duration in whole seconds
    pub time: u32,
    /// RFC 3339 timestamp of when the score was recorded
    pub date: String,
}

/// Raw string key-value capability the leaderboard persists through.
///
/// The web shell backs this with browser local storage; tests use
/// [`MemoryStorage`].
pub trait ScoreStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory [`ScoreStorage`], for tests and non-browser callers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl ScoreStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Per-difficulty top-5 leaderboards over a [`ScoreStorage`].
///
/// Each difficulty is an independent list under its own key; lists are
/// JSON-serialized arrays of [`ScoreEntry`], ranked ascending by
/// `(moves, time)` and capped at [`ScoreBoard::MAX_ENTRIES`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard<S> {
    storage: S,
}

impl<S: ScoreStorage> ScoreBoard<S> {
    pub const MAX_ENTRIES: usize = 5;

    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn storage_key(difficulty: Difficulty) -> String {
        format!("memorito:scores:{}", difficulty.key())
    }

    /// Record a finished game, stamped with the current time.
    pub fn save_score(&mut self, difficulty: Difficulty, moves: u32, time: u32) {
        self.save_score_at(difficulty, moves, time, Utc::now());
    }

    pub fn save_score_at(
        &mut self,
        difficulty: Difficulty,
        moves: u32,
        time: u32,
        now: DateTime<Utc>,
    ) {
        let mut scores = self.scores(difficulty);
        scores.push(ScoreEntry {
            difficulty: difficulty.config().name.to_string(),
            moves,
            time,
            date: now.to_rfc3339(),
        });
        // Fewer moves wins, ties broken by faster time. Stable sort keeps
        // older entries ahead on full ties.
        scores.sort_by_key(|entry| (entry.moves, entry.time));
        scores.truncate(Self::MAX_ENTRIES);

        match serde_json::to_string(&scores) {
            Ok(json) => self.storage.set(&Self::storage_key(difficulty), &json),
            Err(err) => log::error!("could not serialize {:?} leaderboard: {}", difficulty, err),
        }
    }

    /// Ranked entries for one difficulty, best first. A missing or corrupt
    /// stored list reads as empty.
    pub fn scores(&self, difficulty: Difficulty) -> Vec<ScoreEntry> {
        let Some(raw) = self.storage.get(&Self::storage_key(difficulty)) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("discarding corrupt {:?} leaderboard: {}", difficulty, err);
            Vec::new()
        })
    }

    pub fn best_score(&self, difficulty: Difficulty) -> Option<ScoreEntry> {
        self.scores(difficulty).into_iter().next()
    }

    pub fn clear(&mut self, difficulty: Difficulty) {
        self.storage.remove(&Self::storage_key(difficulty));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> ScoreBoard<MemoryStorage> {
        ScoreBoard::new(MemoryStorage::default())
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_storage_reads_as_empty_leaderboard() {
        let board = board();
        assert!(board.scores(Difficulty::Easy).is_empty());
        assert_eq!(board.best_score(Difficulty::Easy), None);
    }

    #[test]
    fn entries_rank_by_moves_then_time() {
        let mut board = board();
        board.save_score_at(Difficulty::Easy, 10, 50, t0());
        board.save_score_at(Difficulty::Easy, 8, 90, t0());
        board.save_score_at(Difficulty::Easy, 8, 60, t0());

        let ranked: Vec<(u32, u32)> = board
            .scores(Difficulty::Easy)
            .iter()
            .map(|entry| (entry.moves, entry.time))
            .collect();
        assert_eq!(ranked, vec![(8, 60), (8, 90), (10, 50)]);
        assert_eq!(board.best_score(Difficulty::Easy).unwrap().moves, 8);
        assert_eq!(board.best_score(Difficulty::Easy).unwrap().time, 60);
    }

    #[test]
    fn leaderboard_keeps_only_the_best_five() {
        let mut board = board();
        for moves in [12, 9, 14, 10, 11, 13] {
            board.save_score_at(Difficulty::Medium, moves, 30, t0());
        }

        let scores = board.scores(Difficulty::Medium);
        assert_eq!(scores.len(), ScoreBoard::<MemoryStorage>::MAX_ENTRIES);
        let ranked: Vec<u32> = scores.iter().map(|entry| entry.moves).collect();
        assert_eq!(ranked, vec![9, 10, 11, 12, 13]);
    }

    #[test]
    fn difficulties_keep_independent_leaderboards() {
        let mut board = board();
        board.save_score_at(Difficulty::Easy, 8, 40, t0());
        board.save_score_at(Difficulty::Hard, 20, 120, t0());

        assert_eq!(board.scores(Difficulty::Easy).len(), 1);
        assert_eq!(board.scores(Difficulty::Hard).len(), 1);
        assert!(board.scores(Difficulty::Medium).is_empty());
        assert_eq!(
            board.best_score(Difficulty::Hard).unwrap().difficulty,
            "Hard (6×6)"
        );
    }

    #[test]
    fn saved_entries_round_trip_through_json() {
        let mut board = board();
        board.save_score_at(Difficulty::Easy, 9, 75, t0());

        let entry = board.best_score(Difficulty::Easy).unwrap();
        assert_eq!(entry.moves, 9);
        assert_eq!(entry.time, 75);
        assert_eq!(entry.date, t0().to_rfc3339());

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(serde_json::from_str::<ScoreEntry>(&json).unwrap(), entry);
    }

    #[test]
    fn corrupt_stored_json_reads_as_empty() {
        let mut storage = MemoryStorage::default();
        storage.set("memorito:scores:easy", "{not json");
        let mut board = ScoreBoard::new(storage);

        assert!(board.scores(Difficulty::Easy).is_empty());

        // Saving over the corrupt list starts a fresh one.
        board.save_score_at(Difficulty::Easy, 11, 80, t0());
        assert_eq!(board.scores(Difficulty::Easy).len(), 1);
    }

    #[test]
    fn clear_drops_one_difficulty_only() {
        let mut board = board();
        board.save_score_at(Difficulty::Easy, 8, 40, t0());
        board.save_score_at(Difficulty::Medium, 9, 50, t0());

        board.clear(Difficulty::Easy);

        assert!(board.scores(Difficulty::Easy).is_empty());
        assert_eq!(board.scores(Difficulty::Medium).len(), 1);
    }
}
