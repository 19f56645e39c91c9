use crate::CardId;

/// One card on the board.
///
/// A matched card stays face-up for the rest of the game: `is_matched`
/// implies `is_flipped`, and the engine never resets either flag on a
/// matched card.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub symbol: &'static str,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    pub const fn face_down(id: CardId, symbol: &'static str) -> Self {
        Self {
            id,
            symbol,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Whether the symbol is currently visible to the player.
    pub const fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    /// Whether a select on this card can be accepted at all.
    pub const fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}
