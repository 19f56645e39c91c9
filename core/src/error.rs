use thiserror::Error;

/// Configuration defects detected while building a deck.
///
/// Gameplay input that cannot be honored (bad card id, clicking during the
/// mismatch lockout, clicking a matched card) is deliberately NOT an error:
/// the engine answers those with a no-change outcome instead.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("symbol catalog holds {available} symbols but {needed} pairs are required")]
    NotEnoughSymbols { needed: usize, available: usize },
    #[error("deck of {0} cards cannot be split into pairs")]
    OddDeckSize(usize),
}

pub type Result<T> = core::result::Result<T, GameError>;
