use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress (first accepted flip)
/// - InProgress -> Won (last pair matched)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// Deck is dealt but no card has been flipped yet
    NotStarted,
    /// Clock is running
    InProgress,
    /// Every pair found, no further moves are accepted
    Won,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Outcome of selecting a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Selection was rejected (bad id, card already face-up, lockout, or the
    /// game is over): state is untouched
    NoChange,
    /// First card of a pair turned face-up, no move counted yet
    Flipped,
    /// Second card completed a pair: both stay up, resolved synchronously
    Matched,
    /// Second card did not match: both stay up until the carried token is
    /// handed back through [`Game::resolve_unflip`] after the flip-back delay
    Mismatch(UnflipToken),
    /// The matched pair was the last one
    Won,
}

impl FlipOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of resolving a delayed unflip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnflipOutcome {
    NoChange,
    Unflipped,
}

impl UnflipOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Unflipped)
    }
}

/// Handle for one scheduled flip-back. The engine only honors the token of
/// the mismatch that is currently armed, so a timer that outlives its game
/// (or fires twice) lands on nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnflipToken(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PendingUnflip {
    first: CardId,
    second: CardId,
    token: UnflipToken,
}

/// Delay the shell should apply between a mismatch and its flip-back.
pub const MISMATCH_DELAY_MS: u32 = 1000;

/// Represents a game from deal to win.
///
/// The engine is a plain state machine: it never sleeps and never talks to a
/// timer. A mismatch arms a pending flip-back and returns its token; the
/// caller owns the delay and feeds the token back in.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    cards: Vec<Card>,
    flipped: Vec<CardId>,
    moves: u32,
    matches: u32,
    state: GameState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    pending_unflip: Option<PendingUnflip>,
    next_token: u64,
}

impl Game {
    pub fn new(cards: Vec<Card>) -> Game {
        Self {
            cards,
            flipped: Vec::with_capacity(2),
            moves: 0,
            matches: 0,
            state: Default::default(),
            started_at: None,
            ended_at: None,
            pending_unflip: None,
            next_token: 0,
        }
    }

    pub fn cur_state(&self) -> GameState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_final()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_at(&self, card_id: CardId) -> Option<Card> {
        self.cards.get(card_id).copied()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn total_pairs(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    /// Ids of the at most two face-up, not yet matched cards, oldest first.
    pub fn flipped_cards(&self) -> &[CardId] {
        &self.flipped
    }

    /// Whether a mismatch is waiting for its delayed flip-back. While this
    /// holds, every new selection is rejected.
    pub fn is_locked_out(&self) -> bool {
        self.flipped.len() >= 2
    }

    /// How many seconds have passed since the first flip, 0 before it, frozen
    /// once the game is won.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs_at(Utc::now())
    }

    pub fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at).num_seconds().max(0) as u32
        } else {
            0
        }
    }

    /// Final time of a won game, `None` while still playing.
    pub fn final_time_secs(&self) -> Option<u32> {
        let started_at = self.started_at?;
        let ended_at = self.ended_at?;
        Some((ended_at - started_at).num_seconds().max(0) as u32)
    }

    /// Select a card, stamping any clock updates with the current time.
    pub fn select_card(&mut self, card_id: CardId) -> FlipOutcome {
        self.select_card_at(card_id, Utc::now())
    }

    /// Select a card. Rejections are silent no-ops, never errors.
    pub fn select_card_at(&mut self, card_id: CardId, now: DateTime<Utc>) -> FlipOutcome {
        use FlipOutcome::*;

        if self.state.is_final() || self.is_locked_out() {
            return NoChange;
        }
        let Some(card) = self.cards.get(card_id) else {
            return NoChange;
        };
        if !card.is_selectable() {
            return NoChange;
        }

        // The clock starts on the first accepted flip, not on deal.
        self.mark_started(now);
        self.cards[card_id].is_flipped = true;
        self.flipped.push(card_id);
        log::debug!("card {} flipped ({})", card_id, self.cards[card_id].symbol);

        let [first, second] = self.flipped[..] else {
            return Flipped;
        };

        // Second card of the pair completes a move either way.
        self.moves += 1;
        if self.cards[first].symbol == self.cards[second].symbol {
            self.cards[first].is_matched = true;
            self.cards[second].is_matched = true;
            self.matches += 1;
            self.flipped.clear();
            log::debug!("pair matched, {}/{}", self.matches, self.total_pairs());
            if self.matches == self.total_pairs() {
                self.mark_ended(now);
                Won
            } else {
                Matched
            }
        } else {
            let token = self.arm_unflip(first, second);
            log::debug!("mismatch, cards {} and {} held face-up", first, second);
            Mismatch(token)
        }
    }

    /// Flip back the two cards of the armed mismatch, keeping any card that
    /// was matched in the meantime face-up.
    ///
    /// A token that is not the currently armed one is ignored, so timers
    /// scheduled for an earlier mismatch or for a previous game cannot touch
    /// this one.
    pub fn resolve_unflip(&mut self, token: UnflipToken) -> UnflipOutcome {
        match self.pending_unflip {
            Some(pending) if pending.token == token => {
                self.pending_unflip = None;
                for card_id in [pending.first, pending.second] {
                    if !self.cards[card_id].is_matched {
                        self.cards[card_id].is_flipped = false;
                    }
                }
                self.flipped.clear();
                log::debug!("mismatch flipped back");
                UnflipOutcome::Unflipped
            }
            _ => UnflipOutcome::NoChange,
        }
    }

    fn arm_unflip(&mut self, first: CardId, second: CardId) -> UnflipToken {
        let token = UnflipToken(self.next_token);
        self.next_token += 1;
        self.pending_unflip = Some(PendingUnflip {
            first,
            second,
            token,
        });
        token
    }

    /// Checks if the state is initial and changes to in-progress recording the start time
    fn mark_started(&mut self, now: DateTime<Utc>) {
        if self.state.is_initial() {
            log::debug!("started at {}", now);
            self.started_at.replace(now);
            self.state = GameState::InProgress;
        }
    }

    fn mark_ended(&mut self, now: DateTime<Utc>) {
        if self.state.is_final() {
            return;
        }
        self.state = GameState::Won;
        self.ended_at.replace(now);
        log::debug!("won at {} after {} moves", now, self.moves);
    }
}
