//! Damage resolution.
//!
//! `resolve_damage_event` is the single rule for cancellable damage; battle
//! attacks and every scripted main-phase effect are built from it.

use super::types::{DamageEvent, DamageOutcome, RevealOutcome};
use crate::deck::{AttackingDeckState, DeckState};
use crate::error::SimResult;
use rand::Rng;

/// Resolve `damage` cancellable damage against `deck`.
///
/// All `damage` cards are drawn even after a cancel, since later draws can
/// still trigger refreshes.
pub fn resolve_damage_event<R: Rng + ?Sized>(
    damage: u32,
    deck: &mut DeckState,
    rng: &mut R,
) -> SimResult<DamageOutcome> {
    let mut outcome = DamageOutcome::default();

    for index in 1..=damage {
        let draw = deck.draw(rng)?;
        if draw.refreshed {
            outcome.refresh_penalty += 1;
        }
        if draw.climax && !outcome.cancelled {
            outcome.cancelled = true;
            outcome.cancel_position = Some(index);
        }
    }

    outcome.dealt = if outcome.cancelled { 0 } else { damage };
    Ok(outcome)
}

/// Draw `cards` cards without any cancellation, counting climaxes.
pub fn reveal_uncancellable<R: Rng + ?Sized>(
    cards: u32,
    deck: &mut DeckState,
    rng: &mut R,
) -> SimResult<RevealOutcome> {
    let mut outcome = RevealOutcome::default();
    for _ in 0..cards {
        let draw = deck.draw(rng)?;
        if draw.refreshed {
            outcome.refresh_penalty += 1;
        }
        if draw.climax {
            outcome.climax_revealed += 1;
        }
    }
    Ok(outcome)
}

/// Resolve a battle attack: +1 damage on a soul trigger, then cancellable
/// damage against the defending deck.
pub fn simulate_attack<R: Rng + ?Sized>(
    damage: u32,
    deck: &mut DeckState,
    attacking: Option<&mut AttackingDeckState>,
    rng: &mut R,
) -> SimResult<DamageOutcome> {
    let triggered = attacking.is_some_and(|state| state.resolve_soul_trigger(rng));
    let adjusted = if triggered { damage + 1 } else { damage };
    resolve_damage_event(adjusted, deck, rng)
}

/// Route one event: attacks go through [`simulate_attack`], effects straight
/// to [`resolve_damage_event`].
pub fn resolve_event<R: Rng + ?Sized>(
    event: DamageEvent,
    deck: &mut DeckState,
    attacking: Option<&mut AttackingDeckState>,
    rng: &mut R,
) -> SimResult<DamageOutcome> {
    if event.is_attack() {
        simulate_attack(event.base_damage, deck, attacking, rng)
    } else {
        resolve_damage_event(event.base_damage, deck, rng)
    }
}
