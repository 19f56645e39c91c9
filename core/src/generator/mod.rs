use crate::*;
pub use random::*;

mod random;

/// Fixed, ordered symbol catalog. A deck for a given difficulty always uses
/// the first `pair_count` entries, so the catalog must stay at least as large
/// as the largest tier's pair count (18 for 6×6).
pub const CARD_SYMBOLS: &[&str] = &[
    "🌟", "🎈", "🎨", "🎭", "🎪", "🎯", "🎲", "🎸", //
    "🌈", "🌺", "🌸", "🌼", "🍀", "🍎", "🍊", "🍋", //
    "🦄", "🦋", "🐙", "🐠", "🐢", "🦜", "🦚", "🦊", //
    "💎", "💫", "⭐", "🔥", "❄️", "🌙", "☀️", "🌊", //
    "🎃", "🎄", "🎆", "🎇", "✨", "💖", "💜", "💙",
];

pub trait DeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<Vec<Card>>;
}

/// Picks the symbols for a deck of `total_cards` cards: the first half of the
/// catalog selection, duplicated once, still in catalog order.
pub(crate) fn paired_symbols(total_cards: usize) -> Result<Vec<&'static str>> {
    if total_cards % 2 != 0 {
        return Err(GameError::OddDeckSize(total_cards));
    }
    let pair_count = total_cards / 2;
    if pair_count > CARD_SYMBOLS.len() {
        return Err(GameError::NotEnoughSymbols {
            needed: pair_count,
            available: CARD_SYMBOLS.len(),
        });
    }

    let selected = &CARD_SYMBOLS[..pair_count];
    let mut symbols = Vec::with_capacity(total_cards);
    symbols.extend_from_slice(selected);
    symbols.extend_from_slice(selected);
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_the_largest_tier() {
        assert!(CARD_SYMBOLS.len() >= Difficulty::Hard.config().pair_count());
    }

    #[test]
    fn paired_symbols_duplicates_the_catalog_prefix() {
        let symbols = paired_symbols(8).unwrap();
        assert_eq!(symbols.len(), 8);
        for symbol in &CARD_SYMBOLS[..4] {
            assert_eq!(symbols.iter().filter(|s| s == &symbol).count(), 2);
        }
    }

    #[test]
    fn oversized_deck_is_a_loud_config_error() {
        let needed = CARD_SYMBOLS.len() + 1;
        assert_eq!(
            paired_symbols(needed * 2),
            Err(GameError::NotEnoughSymbols {
                needed,
                available: CARD_SYMBOLS.len(),
            })
        );
    }

    #[test]
    fn odd_deck_size_is_rejected() {
        assert_eq!(paired_symbols(7), Err(GameError::OddDeckSize(7)));
    }
}
