//! Error type shared by every simulator operation.
//!
//! Failures fall into three groups: configuration errors (bad deck or
//! magic-stone counts), usage errors (bad trial counts, bad step input, empty
//! samples) and tuning-parameter errors. All of them are terminal to the call.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("deck_cards must be positive")]
    EmptyDeck,

    #[error("{pile} climax cards ({climax}) cannot exceed {pile} cards ({cards})")]
    ClimaxExceedsPile {
        pile: &'static str,
        climax: u32,
        cards: u32,
    },

    #[error("waiting room override {override_cards}/{override_climax} conflicts with initial waiting room {initial_cards}/{initial_climax}")]
    ConflictingWaitingRoom {
        initial_cards: u32,
        initial_climax: u32,
        override_cards: u32,
        override_climax: u32,
    },

    #[error("attacking_soul_trigger_cards requires attacking_deck_size")]
    SoulTriggersWithoutAttackingDeck,

    #[error("attacking_deck_size must be positive")]
    EmptyAttackingDeck,

    #[error("attacking_soul_trigger_cards ({soul_triggers}) cannot exceed attacking_deck_size ({deck_size})")]
    SoulTriggersExceedAttackingDeck { soul_triggers: u32, deck_size: u32 },

    #[error("{pile} composition does not match configuration")]
    CompositionMismatch { pile: &'static str },

    #[error("stock_cards + deck_cards must be positive")]
    EmptyMagicStonePool,

    #[error("{pile} holds more than {} cards", u32::MAX)]
    PileTooLarge { pile: &'static str },

    // ── Usage ────────────────────────────────────────────────────────
    #[error("trials must be positive")]
    NoTrials,

    #[error("damage sample cannot be empty")]
    EmptySample,

    #[error("top stack of {requested} cards is longer than current deck ({available})")]
    TopStackTooLong { requested: usize, available: usize },

    #[error("top stack uses {requested} climax cards but the deck holds {available}")]
    TopStackClimaxUnavailable { requested: usize, available: usize },

    #[error("main phase step '{step}' failed: {reason}")]
    StepFailed { step: String, reason: String },

    #[error("trial damage total exceeds {}", u32::MAX)]
    DamageOverflow,

    // ── Tuning ───────────────────────────────────────────────────────
    #[error("trial counts must be positive")]
    NonPositiveTrialBound,

    #[error("min_trials ({min}) cannot exceed max_trials ({max})")]
    InvertedTrialBounds { min: u32, max: u32 },

    #[error("step_factor must be greater than 1.0 (got {0})")]
    InvalidStepFactor(f64),

    #[error("target_error must be positive (got {0})")]
    InvalidTargetError(f64),
}
