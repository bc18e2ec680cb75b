//! Magic stone: shuffle the stock into the deck and deal the stock back out.

use crate::deck::build_pile;
use crate::error::{SimError, SimResult};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::Serialize;

/// Pile compositions after a magic stone resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MagicStoneResult {
    pub deck_cards: u32,
    pub deck_climax_cards: u32,
    pub stock_cards: u32,
    pub stock_climax_cards: u32,
}

/// Merge stock and deck into one pool, shuffle it, and deal `deck_cards`
/// back into the deck with the rest returning to stock.
///
/// Uses the thread-local generator when `rng` is `None`.
pub fn apply_magic_stone_effect(
    stock_cards: u32,
    stock_climax_cards: u32,
    deck_cards: u32,
    deck_climax_cards: u32,
    rng: Option<&mut dyn RngCore>,
) -> SimResult<MagicStoneResult> {
    if stock_climax_cards > stock_cards {
        return Err(SimError::ClimaxExceedsPile {
            pile: "stock",
            climax: stock_climax_cards,
            cards: stock_cards,
        });
    }
    if deck_climax_cards > deck_cards {
        return Err(SimError::ClimaxExceedsPile {
            pile: "deck",
            climax: deck_climax_cards,
            cards: deck_cards,
        });
    }

    let total_cards = stock_cards
        .checked_add(deck_cards)
        .ok_or(SimError::PileTooLarge {
            pile: "magic stone pool",
        })?;
    if total_cards == 0 {
        return Err(SimError::EmptyMagicStonePool);
    }
    // Bounded by total_cards, so it cannot overflow
    let total_climax = stock_climax_cards + deck_climax_cards;

    let mut pool = build_pile(total_cards as usize, total_climax as usize);
    match rng {
        Some(rng) => pool.shuffle(rng),
        None => pool.shuffle(&mut rand::thread_rng()),
    }

    let new_deck_climax = pool[..deck_cards as usize].iter().filter(|&&c| c).count() as u32;

    Ok(MagicStoneResult {
        deck_cards,
        deck_climax_cards: new_deck_climax,
        stock_cards,
        stock_climax_cards: total_climax - new_deck_climax,
    })
}
