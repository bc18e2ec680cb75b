//! Deck model: validated configuration, the per-trial deck/waiting-room
//! state, and the attacker's own deck used for soul triggers.

mod attacking;
mod config;
mod state;

pub use attacking::AttackingDeckState;
pub use config::{AttackingDeck, DeckConfig, DeckSetup, PileCounts};
pub use state::{DeckState, Draw};

/// Builds a pile of `climax` true flags followed by `false` padding up to
/// `cards`. Callers shuffle it.
pub(crate) fn build_pile(cards: usize, climax: usize) -> Vec<bool> {
    let mut pile = vec![true; climax];
    pile.resize(cards.max(climax), false);
    pile
}

pub(crate) fn climax_count(pile: &[bool]) -> usize {
    pile.iter().filter(|&&card| card).count()
}
