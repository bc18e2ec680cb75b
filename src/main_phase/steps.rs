//! Built-in main-phase steps.

use crate::damage::{resolve_damage_event, reveal_uncancellable};
use crate::deck::{build_pile, climax_count, DeckState};
use crate::error::{SimError, SimResult};
use rand::seq::SliceRandom;
use rand::Rng;

/// Place a known `top_stack` (top to bottom, `true` = climax) on top of the
/// deck. The rest of the deck is regenerated with the leftover composition and
/// shuffled. Always deals 0 damage.
pub fn seed_top_stack<R: Rng + ?Sized>(
    deck: &mut DeckState,
    top_stack: &[bool],
    rng: &mut R,
) -> SimResult<u32> {
    let deck_size = deck.deck().len();
    if top_stack.len() > deck_size {
        return Err(SimError::TopStackTooLong {
            requested: top_stack.len(),
            available: deck_size,
        });
    }

    let deck_climax = deck.deck_climax_count();
    let top_climax = climax_count(top_stack);
    let remainder_size = deck_size - top_stack.len();
    // The remainder has to absorb every climax the stack leaves behind
    if top_climax > deck_climax || deck_climax - top_climax > remainder_size {
        return Err(SimError::TopStackClimaxUnavailable {
            requested: top_climax,
            available: deck_climax,
        });
    }

    let mut seeded = build_pile(remainder_size, deck_climax - top_climax);
    seeded.shuffle(rng);
    seeded.extend(top_stack.iter().rev());
    deck.replace_deck(seeded)?;
    Ok(0)
}

/// Deal 4 cancellable damage; only when the 4th card is the one that cancels,
/// deal a follow-up 4 cancellable damage.
pub fn fourth_cancel_bonus_damage<R: Rng + ?Sized>(
    deck: &mut DeckState,
    rng: &mut R,
) -> SimResult<u32> {
    let first = resolve_damage_event(4, deck, rng)?;
    let mut total = first.total();
    if first.cancel_position == Some(4) {
        total += resolve_damage_event(4, deck, rng)?.total();
    }
    Ok(total)
}

/// Reveal the top 9 cards and clock one uncancellable damage per climax,
/// plus any refresh penalty incurred during the reveal.
pub fn reveal_nine_clock_climaxes<R: Rng + ?Sized>(
    deck: &mut DeckState,
    rng: &mut R,
) -> SimResult<u32> {
    let reveal = reveal_uncancellable(9, deck, rng)?;
    Ok(reveal.climax_revealed + reveal.refresh_penalty)
}
