use super::*;

/// Deals a uniformly shuffled deck from a seed, so a fixed seed reproduces
/// the exact same layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<Vec<Card>> {
        use rand::prelude::*;

        let config = difficulty.config();
        let mut symbols = paired_symbols(config.total_cards())?;

        // Fisher-Yates: swap each position with a uniform pick at or below it.
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in (1..symbols.len()).rev() {
            let j = rng.random_range(0..=i);
            symbols.swap(i, j);
        }

        log::debug!(
            "dealt {} cards ({} pairs) for {:?}",
            symbols.len(),
            symbols.len() / 2,
            difficulty
        );

        Ok(symbols
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Card::face_down(id, symbol))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn symbol_counts(cards: &[Card]) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for card in cards {
            *counts.entry(card.symbol).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn deck_has_one_card_per_grid_cell() {
        for difficulty in Difficulty::ALL {
            let deck = RandomDeckGenerator::new(7).generate(difficulty).unwrap();
            assert_eq!(deck.len(), difficulty.config().total_cards());
        }
    }

    #[test]
    fn every_symbol_appears_exactly_twice() {
        for difficulty in Difficulty::ALL {
            let deck = RandomDeckGenerator::new(99).generate(difficulty).unwrap();
            for (symbol, count) in symbol_counts(&deck) {
                assert_eq!(count, 2, "symbol {} in {:?}", symbol, difficulty);
            }
        }
    }

    #[test]
    fn ids_are_contiguous_positions() {
        let deck = RandomDeckGenerator::new(3).generate(Difficulty::Hard).unwrap();
        for (position, card) in deck.iter().enumerate() {
            assert_eq!(card.id, position);
            assert!(!card.is_flipped);
            assert!(!card.is_matched);
        }
    }

    #[test]
    fn shuffle_is_a_permutation_of_the_unshuffled_symbols() {
        let deck = RandomDeckGenerator::new(1234).generate(Difficulty::Medium).unwrap();
        let unshuffled: Vec<Card> = paired_symbols(deck.len())
            .unwrap()
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Card::face_down(id, symbol))
            .collect();
        assert_eq!(symbol_counts(&deck), symbol_counts(&unshuffled));
    }

    #[test]
    fn same_seed_same_deck() {
        let a = RandomDeckGenerator::new(42).generate(Difficulty::Easy).unwrap();
        let b = RandomDeckGenerator::new(42).generate(Difficulty::Easy).unwrap();
        assert_eq!(a, b);
    }
}
