//! Pre-battle deck manipulation.
//!
//! A main phase is an ordered list of [`MainPhaseStep`]s run against a fresh
//! [`DeckState`] before the battle sequence of each trial. Every step mutates
//! the deck and returns the damage it dealt, refresh penalties included.

mod magic_stone;
mod steps;

pub use magic_stone::{apply_magic_stone_effect, MagicStoneResult};
pub use steps::{fourth_cancel_bonus_damage, reveal_nine_clock_climaxes, seed_top_stack};

use crate::deck::DeckState;
use crate::error::SimResult;
use rand::RngCore;
use std::fmt;

/// A caller-defined main-phase effect.
pub trait MainPhaseEffect {
    /// Label used in logs and error messages.
    fn name(&self) -> &str;

    /// Mutate `deck` and return the damage dealt.
    fn apply(&self, deck: &mut DeckState, rng: &mut dyn RngCore) -> SimResult<u32>;
}

/// One step of a scripted main phase.
pub enum MainPhaseStep {
    /// Force a known top-to-bottom climax pattern onto the deck. Deals no damage.
    SeedTopStack(Vec<bool>),
    /// 4 cancellable damage; if the 4th card cancels, 4 more.
    FourthCancelBonus,
    /// Reveal 9 cards, 1 uncancellable damage per climax revealed.
    RevealNineClock,
    Custom(Box<dyn MainPhaseEffect>),
}

impl MainPhaseStep {
    pub fn custom(effect: impl MainPhaseEffect + 'static) -> Self {
        Self::Custom(Box::new(effect))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::SeedTopStack(_) => "seed_top_stack",
            Self::FourthCancelBonus => "fourth_cancel_bonus",
            Self::RevealNineClock => "reveal_nine_clock",
            Self::Custom(effect) => effect.name(),
        }
    }

    pub fn apply(&self, deck: &mut DeckState, rng: &mut dyn RngCore) -> SimResult<u32> {
        match self {
            Self::SeedTopStack(top_stack) => seed_top_stack(deck, top_stack, rng),
            Self::FourthCancelBonus => fourth_cancel_bonus_damage(deck, rng),
            Self::RevealNineClock => reveal_nine_clock_climaxes(deck, rng),
            Self::Custom(effect) => effect.apply(deck, rng),
        }
    }
}

impl fmt::Debug for MainPhaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedTopStack(top_stack) => f.debug_tuple("SeedTopStack").field(top_stack).finish(),
            Self::FourthCancelBonus => f.write_str("FourthCancelBonus"),
            Self::RevealNineClock => f.write_str("RevealNineClock"),
            Self::Custom(effect) => f.debug_tuple("Custom").field(&effect.name()).finish(),
        }
    }
}
