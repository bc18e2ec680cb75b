//! Deck configuration.
//!
//! `DeckSetup` is the raw input form. It accepts the waiting room in either of
//! two phrasings (an "initial" waiting room or an override). `DeckConfig` is
//! the validated result with a single canonical waiting-room pile and can only
//! be obtained through [`DeckSetup::build`].

use crate::error::{SimError, SimResult};
use serde::Serialize;

/// Card and climax counts for one pile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PileCounts {
    pub cards: u32,
    pub climax: u32,
}

impl PileCounts {
    pub fn new(cards: u32, climax: u32) -> Self {
        Self { cards, climax }
    }

    fn validate(self, pile: &'static str) -> SimResult<Self> {
        if self.climax > self.cards {
            return Err(SimError::ClimaxExceedsPile {
                pile,
                climax: self.climax,
                cards: self.cards,
            });
        }
        Ok(self)
    }
}

/// The attacker's own deck, used for soul trigger checks.
///
/// Only produced by [`DeckSetup::build`], so `size` is positive and
/// `soul_triggers <= size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackingDeck {
    size: u32,
    soul_triggers: u32,
}

impl AttackingDeck {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn soul_triggers(&self) -> u32 {
        self.soul_triggers
    }
}

/// Unvalidated deck description as supplied by a caller.
///
/// Waiting room counts are added on top of the deck rather than subtracted
/// from it: they represent cards already milled or clocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckSetup {
    /// Cards currently in the deck
    pub deck_cards: u32,

    /// Climax cards currently in the deck
    pub deck_climax_cards: u32,

    /// Waiting room at the start of the game state being modelled
    pub initial_waiting_room: Option<PileCounts>,

    /// Waiting room, alternate phrasing. If both this and
    /// `initial_waiting_room` are given they must be equal, otherwise
    /// `build` fails with `ConflictingWaitingRoom`
    pub waiting_room: Option<PileCounts>,

    /// Attacker deck size; `None` disables soul triggers entirely
    pub attacking_deck_size: Option<u32>,

    /// Soul trigger cards in the attacker deck
    pub attacking_soul_trigger_cards: u32,
}

impl DeckSetup {
    pub fn new(deck_cards: u32, deck_climax_cards: u32) -> Self {
        Self {
            deck_cards,
            deck_climax_cards,
            ..Default::default()
        }
    }

    pub fn with_waiting_room(mut self, cards: u32, climax: u32) -> Self {
        self.waiting_room = Some(PileCounts::new(cards, climax));
        self
    }

    pub fn with_initial_waiting_room(mut self, cards: u32, climax: u32) -> Self {
        self.initial_waiting_room = Some(PileCounts::new(cards, climax));
        self
    }

    pub fn with_attacking_deck(mut self, size: u32, soul_triggers: u32) -> Self {
        self.attacking_deck_size = Some(size);
        self.attacking_soul_trigger_cards = soul_triggers;
        self
    }

    /// Validate every count and relationship, producing a `DeckConfig`.
    pub fn build(&self) -> SimResult<DeckConfig> {
        if self.deck_cards == 0 {
            return Err(SimError::EmptyDeck);
        }
        let deck = PileCounts::new(self.deck_cards, self.deck_climax_cards).validate("deck")?;
        let waiting_room = self.resolve_waiting_room()?;
        if deck.cards.checked_add(waiting_room.cards).is_none() {
            return Err(SimError::PileTooLarge {
                pile: "deck and waiting room",
            });
        }

        let attacking = match self.attacking_deck_size {
            None if self.attacking_soul_trigger_cards > 0 => {
                return Err(SimError::SoulTriggersWithoutAttackingDeck);
            }
            None => None,
            Some(0) => return Err(SimError::EmptyAttackingDeck),
            Some(size) if self.attacking_soul_trigger_cards > size => {
                return Err(SimError::SoulTriggersExceedAttackingDeck {
                    soul_triggers: self.attacking_soul_trigger_cards,
                    deck_size: size,
                });
            }
            Some(size) => Some(AttackingDeck {
                size,
                soul_triggers: self.attacking_soul_trigger_cards,
            }),
        };

        Ok(DeckConfig {
            deck,
            waiting_room,
            attacking,
        })
    }

    fn resolve_waiting_room(&self) -> SimResult<PileCounts> {
        let initial = self
            .initial_waiting_room
            .map(|pile| pile.validate("initial waiting room"))
            .transpose()?;
        let overridden = self
            .waiting_room
            .map(|pile| pile.validate("waiting room"))
            .transpose()?;

        match (initial, overridden) {
            (Some(initial), Some(overridden)) if initial != overridden => {
                Err(SimError::ConflictingWaitingRoom {
                    initial_cards: initial.cards,
                    initial_climax: initial.climax,
                    override_cards: overridden.cards,
                    override_climax: overridden.climax,
                })
            }
            (_, Some(pile)) | (Some(pile), None) => Ok(pile),
            (None, None) => Ok(PileCounts::default()),
        }
    }
}

/// Validated, immutable deck configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeckConfig {
    deck: PileCounts,
    waiting_room: PileCounts,
    attacking: Option<AttackingDeck>,
}

impl DeckConfig {
    /// Deck only, empty waiting room, no attacking deck.
    pub fn new(deck_cards: u32, deck_climax_cards: u32) -> SimResult<Self> {
        DeckSetup::new(deck_cards, deck_climax_cards).build()
    }

    pub fn deck(&self) -> PileCounts {
        self.deck
    }

    /// The effective waiting room after resolving both input phrasings.
    pub fn waiting_room(&self) -> PileCounts {
        self.waiting_room
    }

    pub fn attacking(&self) -> Option<AttackingDeck> {
        self.attacking
    }

    pub fn total_cards(&self) -> u32 {
        self.deck.cards + self.waiting_room.cards
    }

    pub fn total_climax_cards(&self) -> u32 {
        self.deck.climax + self.waiting_room.climax
    }
}

impl TryFrom<DeckSetup> for DeckConfig {
    type Error = SimError;

    fn try_from(setup: DeckSetup) -> SimResult<Self> {
        setup.build()
    }
}
