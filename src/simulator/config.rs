//! Simulation configuration.

use super::tuner::TuneConfig;
use crate::damage::{attacks, DamageEvent};
use crate::deck::DeckConfig;
use crate::error::SimResult;
use crate::main_phase::MainPhaseStep;

/// Configuration for a simulation run.
#[derive(Debug)]
pub struct SimConfig {
    /// Battle damage events, resolved in order each trial
    pub damage_sequence: Vec<DamageEvent>,

    /// Defending deck composition
    pub deck: DeckConfig,

    /// Number of trials (used as the starting count when auto-tuning)
    pub trials: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Steps run before the battle sequence of every trial
    pub main_phase_steps: Vec<MainPhaseStep>,

    /// Tune the trial count before the final run
    pub auto_tune: Option<TuneConfig>,
}

impl SimConfig {
    pub fn new(damage_sequence: Vec<DamageEvent>, deck: DeckConfig) -> Self {
        Self {
            damage_sequence,
            deck,
            trials: 5000,
            seed: Some(1),
            main_phase_steps: Vec::new(),
            auto_tune: None,
        }
    }

    /// Quick config: bare attack damages against a 50-card deck with 8 climaxes.
    pub fn quick(damages: &[u32]) -> SimResult<Self> {
        Ok(Self::new(attacks(damages), DeckConfig::new(50, 8)?))
    }

    /// Quick config for estimating how many trials a threshold needs.
    pub fn tuned(damages: &[u32], threshold: u32) -> SimResult<Self> {
        let mut config = Self::quick(damages)?;
        config.auto_tune = Some(TuneConfig {
            min_trials: config.trials,
            seed: config.seed,
            ..TuneConfig::new(threshold)
        });
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_defaults() {
        let config = SimConfig::quick(&[2, 3, 3]).unwrap();
        assert_eq!(config.damage_sequence.len(), 3);
        assert!(config.damage_sequence.iter().all(|e| e.is_attack()));
        assert_eq!(config.deck.deck().cards, 50);
        assert_eq!(config.trials, 5000);
        assert_eq!(config.seed, Some(1));
        assert!(config.auto_tune.is_none());
    }

    #[test]
    fn test_tuned_starts_from_trial_count() {
        let config = SimConfig::tuned(&[3, 3], 6).unwrap();
        let tune = config.auto_tune.unwrap();
        assert_eq!(tune.threshold, 6);
        assert_eq!(tune.min_trials, 5000);
        assert_eq!(tune.max_trials, 50_000);
    }
}
