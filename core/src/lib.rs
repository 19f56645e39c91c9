use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scores::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod scores;
mod types;

/// Grid dimensions for one difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub rows: usize,
    pub cols: usize,
    pub name: &'static str,
}

impl DifficultyConfig {
    pub const fn total_cards(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn pair_count(&self) -> usize {
        self.total_cards() / 2
    }
}

/// The three supported grid sizes. Each one keeps an independent leaderboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> &'static DifficultyConfig {
        const EASY: DifficultyConfig = DifficultyConfig {
            rows: 4,
            cols: 4,
            name: "Easy (4×4)",
        };
        const MEDIUM: DifficultyConfig = DifficultyConfig {
            rows: 4,
            cols: 6,
            name: "Medium (4×6)",
        };
        const HARD: DifficultyConfig = DifficultyConfig {
            rows: 6,
            cols: 6,
            name: "Hard (6×6)",
        };
        match self {
            Self::Easy => &EASY,
            Self::Medium => &MEDIUM,
            Self::Hard => &HARD,
        }
    }

    /// Lowercase identifier used to key per-difficulty storage.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_difficulty_has_an_even_card_count() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            assert_eq!(config.total_cards() % 2, 0, "{:?}", difficulty);
            assert_eq!(config.pair_count() * 2, config.total_cards());
        }
    }

    #[test]
    fn difficulty_dimensions_match_the_advertised_names() {
        assert_eq!(Difficulty::Easy.config().total_cards(), 16);
        assert_eq!(Difficulty::Medium.config().total_cards(), 24);
        assert_eq!(Difficulty::Hard.config().total_cards(), 36);
        assert_eq!(Difficulty::Hard.config().pair_count(), 18);
    }

    #[test]
    fn storage_keys_are_distinct() {
        assert_eq!(Difficulty::Easy.key(), "easy");
        assert_eq!(Difficulty::Medium.key(), "medium");
        assert_eq!(Difficulty::Hard.key(), "hard");
    }
}
