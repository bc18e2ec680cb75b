//! Adaptive trial-count tuning.
//!
//! Re-runs the simulation at geometrically growing trial counts until two
//! consecutive estimates of P(damage >= threshold) agree within
//! `target_error`. This is a Cauchy-style stopping heuristic, not a
//! confidence interval.

use super::report::cumulative_probability_at_least;
use super::runner::{seeded_rng, simulate_trials};
use crate::damage::DamageEvent;
use crate::deck::DeckConfig;
use crate::error::{SimError, SimResult};
use crate::main_phase::MainPhaseStep;
use log::info;
use rand::Rng;
use serde::Serialize;

/// Tuning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TuneConfig {
    /// Damage threshold whose probability is being estimated
    pub threshold: u32,
    /// Largest accepted difference between consecutive estimates
    pub target_error: f64,
    pub min_trials: u32,
    pub max_trials: u32,
    /// Multiplier applied to the trial count after each round
    pub step_factor: f64,
    /// Seed for the tuner's own generator (None = random)
    pub seed: Option<u64>,
}

impl TuneConfig {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            target_error: 0.01,
            min_trials: 500,
            max_trials: 50_000,
            step_factor: 2.0,
            seed: None,
        }
    }

    fn validate(&self) -> SimResult<()> {
        if self.min_trials == 0 || self.max_trials == 0 {
            return Err(SimError::NonPositiveTrialBound);
        }
        if self.min_trials > self.max_trials {
            return Err(SimError::InvertedTrialBounds {
                min: self.min_trials,
                max: self.max_trials,
            });
        }
        // Written as negations so NaN is rejected too
        if !(self.step_factor > 1.0) {
            return Err(SimError::InvalidStepFactor(self.step_factor));
        }
        if !(self.target_error > 0.0 && self.target_error.is_finite()) {
            return Err(SimError::InvalidTargetError(self.target_error));
        }
        Ok(())
    }
}

/// Outcome of [`tune_trial_count`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuneResult {
    /// Chosen trial count, within `[min_trials, max_trials]`
    pub trials: u32,
    /// Probability estimate from each round, in order
    pub history: Vec<f64>,
    /// The last two estimates agreed within `target_error`
    pub converged: bool,
}

/// Find a trial count at which the estimate at `config.threshold` settles.
pub fn tune_trial_count(
    damage_sequence: &[DamageEvent],
    deck: &DeckConfig,
    main_phase_steps: &[MainPhaseStep],
    config: &TuneConfig,
) -> SimResult<TuneResult> {
    config.validate()?;

    let mut rng = seeded_rng(config.seed);
    let mut history: Vec<f64> = Vec::new();
    let mut trial_count = config.min_trials;

    loop {
        let trial_seed = u64::from(rng.gen::<u32>());
        let damages = simulate_trials(
            damage_sequence,
            deck,
            trial_count,
            Some(trial_seed),
            main_phase_steps,
        )?;
        let probability = cumulative_probability_at_least(&damages, [config.threshold])?
            .get(&config.threshold)
            .copied()
            .unwrap_or(0.0);
        history.push(probability);
        info!(
            "Tuning: {} trials -> P(damage >= {}) = {:.4}",
            trial_count, config.threshold, probability
        );

        if let [.., previous, latest] = history[..] {
            if (latest - previous).abs() <= config.target_error {
                info!("Tuning converged at {} trials", trial_count);
                return Ok(TuneResult {
                    trials: trial_count,
                    history,
                    converged: true,
                });
            }
        }

        let grown = (f64::from(trial_count) * config.step_factor).floor() as u32;
        let next_trials = grown.min(config.max_trials);
        if next_trials <= trial_count {
            info!("Tuning stopped at {} trials without converging", trial_count);
            return Ok(TuneResult {
                trials: trial_count,
                history,
                converged: false,
            });
        }
        trial_count = next_trials;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::attacks;

    fn tune(config: &TuneConfig) -> SimResult<TuneResult> {
        let deck = DeckConfig::new(45, 8).unwrap();
        tune_trial_count(&attacks(&[3, 3, 3]), &deck, &[], config)
    }

    #[test]
    fn test_parameter_validation() {
        let base = TuneConfig::new(6);

        let zero = TuneConfig {
            min_trials: 0,
            ..base.clone()
        };
        assert_eq!(tune(&zero), Err(SimError::NonPositiveTrialBound));

        let inverted = TuneConfig {
            min_trials: 600,
            max_trials: 500,
            ..base.clone()
        };
        assert_eq!(
            tune(&inverted),
            Err(SimError::InvertedTrialBounds { min: 600, max: 500 })
        );

        let flat = TuneConfig {
            step_factor: 1.0,
            ..base.clone()
        };
        assert!(matches!(tune(&flat), Err(SimError::InvalidStepFactor(_))));

        let nan = TuneConfig {
            step_factor: f64::NAN,
            ..base.clone()
        };
        assert!(matches!(tune(&nan), Err(SimError::InvalidStepFactor(_))));

        let no_error = TuneConfig {
            target_error: 0.0,
            ..base
        };
        assert!(matches!(tune(&no_error), Err(SimError::InvalidTargetError(_))));
    }

    #[test]
    fn test_result_within_bounds() {
        let config = TuneConfig {
            target_error: 0.02,
            min_trials: 200,
            max_trials: 5000,
            seed: Some(99),
            ..TuneConfig::new(6)
        };
        let result = tune(&config).unwrap();

        assert!(result.trials >= 200 && result.trials <= 5000);
        assert!(!result.history.is_empty());
        if result.converged {
            let n = result.history.len();
            assert!((result.history[n - 1] - result.history[n - 2]).abs() <= 0.02);
        } else {
            assert_eq!(result.trials, 5000);
        }
    }

    #[test]
    fn test_certain_outcome_converges_after_two_rounds() {
        // Threshold 0 is always met, so every estimate is exactly 1.0
        let config = TuneConfig {
            min_trials: 50,
            max_trials: 1000,
            seed: Some(1),
            ..TuneConfig::new(0)
        };
        let result = tune(&config).unwrap();

        assert!(result.converged);
        assert_eq!(result.trials, 100);
        assert_eq!(result.history, vec![1.0, 1.0]);
    }

    #[test]
    fn test_equal_bounds_stop_after_one_round() {
        let config = TuneConfig {
            min_trials: 300,
            max_trials: 300,
            seed: Some(5),
            ..TuneConfig::new(4)
        };
        let result = tune(&config).unwrap();

        assert_eq!(result.trials, 300);
        assert_eq!(result.history.len(), 1);
        assert!(!result.converged);
    }

    #[test]
    fn test_same_seed_same_history() {
        let config = TuneConfig {
            min_trials: 100,
            max_trials: 1600,
            seed: Some(42),
            ..TuneConfig::new(5)
        };
        assert_eq!(tune(&config).unwrap(), tune(&config).unwrap());
    }
}
