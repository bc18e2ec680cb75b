//! Per-trial deck and waiting room.

use super::{build_pile, climax_count, DeckConfig};
use crate::error::{SimError, SimResult};
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of drawing one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// The drawn card is a climax
    pub climax: bool,
    /// The deck was empty and the waiting room was reshuffled before this draw
    pub refreshed: bool,
}

/// Mutable deck / waiting room pair for a single trial.
///
/// Cards are `bool` flags (`true` = climax). The top of the deck is the end of
/// the vector. Total card and climax counts across both piles are fixed for
/// the lifetime of the state.
#[derive(Debug, Clone)]
pub struct DeckState {
    deck: Vec<bool>,
    waiting_room: Vec<bool>,
    total_cards: usize,
    total_climax_cards: usize,
}

impl DeckState {
    /// Builds both piles from `config` and shuffles them. The waiting room is
    /// shuffled first, then the deck.
    pub fn new<R: Rng + ?Sized>(config: &DeckConfig, rng: &mut R) -> SimResult<Self> {
        let deck_counts = config.deck();
        let waiting_counts = config.waiting_room();

        let mut waiting_room = build_pile(
            waiting_counts.cards as usize,
            waiting_counts.climax as usize,
        );
        waiting_room.shuffle(rng);
        let mut deck = build_pile(deck_counts.cards as usize, deck_counts.climax as usize);
        deck.shuffle(rng);

        let state = Self {
            deck,
            waiting_room,
            total_cards: config.total_cards() as usize,
            total_climax_cards: config.total_climax_cards() as usize,
        };
        state.validate()?;
        if state.deck.len() != deck_counts.cards as usize
            || state.deck_climax_count() != deck_counts.climax as usize
        {
            return Err(SimError::CompositionMismatch { pile: "deck" });
        }
        if state.waiting_room.len() != waiting_counts.cards as usize
            || state.waiting_room_climax_count() != waiting_counts.climax as usize
        {
            return Err(SimError::CompositionMismatch {
                pile: "waiting room",
            });
        }
        Ok(state)
    }

    /// Draw the top card into the waiting room, refreshing first if the deck
    /// is empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SimResult<Draw> {
        let refreshed = self.deck.is_empty();
        if refreshed {
            self.refresh(rng)?;
        }

        let climax = self
            .deck
            .pop()
            .ok_or(SimError::CompositionMismatch { pile: "deck" })?;
        self.waiting_room.push(climax);
        Ok(Draw { climax, refreshed })
    }

    fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SimResult<()> {
        self.deck = std::mem::take(&mut self.waiting_room);
        self.deck.shuffle(rng);
        self.validate()
    }

    /// Deck contents, bottom first.
    pub fn deck(&self) -> &[bool] {
        &self.deck
    }

    /// Waiting room contents in the order cards arrived.
    pub fn waiting_room(&self) -> &[bool] {
        &self.waiting_room
    }

    pub fn deck_climax_count(&self) -> usize {
        climax_count(&self.deck)
    }

    pub fn waiting_room_climax_count(&self) -> usize {
        climax_count(&self.waiting_room)
    }

    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    pub fn total_climax_cards(&self) -> usize {
        self.total_climax_cards
    }

    /// Swap in a new deck with the same size and climax count.
    pub(crate) fn replace_deck(&mut self, deck: Vec<bool>) -> SimResult<()> {
        if deck.len() != self.deck.len() || climax_count(&deck) != self.deck_climax_count() {
            return Err(SimError::CompositionMismatch { pile: "deck" });
        }
        self.deck = deck;
        self.validate()
    }

    fn validate(&self) -> SimResult<()> {
        let cards = self.deck.len() + self.waiting_room.len();
        let climax = self.deck_climax_count() + self.waiting_room_climax_count();
        if cards != self.total_cards || climax != self.total_climax_cards {
            return Err(SimError::CompositionMismatch {
                pile: "deck and waiting room",
            });
        }
        Ok(())
    }
}
