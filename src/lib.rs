//! ws-sim - Monte Carlo damage simulator for climax-cancel card battles
//!
//! Estimates the distribution of total damage a sequence of attacks deals
//! against a shuffled deck, where revealing a climax card cancels an attack.

pub mod build_info;
pub mod damage;
pub mod deck;
pub mod error;
pub mod main_phase;
pub mod simulator;

pub use damage::{DamageEvent, DamageKind, DamageOutcome};
pub use deck::{AttackingDeckState, DeckConfig, DeckSetup, DeckState, Draw, PileCounts};
pub use error::{SimError, SimResult};
pub use main_phase::{apply_magic_stone_effect, MagicStoneResult, MainPhaseEffect, MainPhaseStep};
pub use simulator::{
    cumulative_probability_at_least, run_main_phase_and_battle, run_main_phase_scenarios,
    run_simulation, simulate_trials, tune_trial_count, SimConfig, SimReport, TuneConfig,
    TuneResult,
};
