//! Integration test: full simulation runs
//!
//! Reproducibility, refresh accounting, soul triggers and auto-tuning through
//! the public API.

use ws_sim::damage::attacks;
use ws_sim::{
    cumulative_probability_at_least, run_simulation, simulate_trials, tune_trial_count,
    DamageEvent, DeckConfig, DeckSetup, SimConfig, SimError, TuneConfig,
};

#[test]
fn test_reproducible_trials() {
    let config = DeckSetup::new(30, 6)
        .with_waiting_room(15, 2)
        .with_attacking_deck(40, 8)
        .build()
        .unwrap();
    let sequence = attacks(&[2, 3, 1]);

    let first = simulate_trials(&sequence, &config, 500, Some(123), &[]).unwrap();
    let second = simulate_trials(&sequence, &config, 500, Some(123), &[]).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_different_seeds_differ() {
    let config = DeckConfig::new(50, 8).unwrap();
    let sequence = attacks(&[3, 3, 3]);

    let a = simulate_trials(&sequence, &config, 500, Some(1), &[]).unwrap();
    let b = simulate_trials(&sequence, &config, 500, Some(2), &[]).unwrap();

    assert_ne!(a, b);
}

#[test]
fn test_cumulative_probability_is_monotonic() {
    let config = DeckConfig::new(40, 8).unwrap();
    let damages = simulate_trials(&attacks(&[2, 2, 2]), &config, 2000, Some(321), &[]).unwrap();
    let max = *damages.iter().max().unwrap();

    let probabilities = cumulative_probability_at_least(&damages, 0..=max).unwrap();

    assert_eq!(probabilities[&0], 1.0);
    let mut previous = 1.0;
    for threshold in 0..=max {
        assert!(probabilities[&threshold] <= previous + 1e-9);
        previous = probabilities[&threshold];
    }
}

#[test]
fn test_climax_free_deck_deals_full_damage() {
    let config = DeckConfig::new(50, 0).unwrap();
    let damages = simulate_trials(&attacks(&[3, 2, 4]), &config, 100, Some(5), &[]).unwrap();
    assert!(damages.iter().all(|&d| d == 9));
}

#[test]
fn test_refresh_penalty_is_added_once_per_refresh() {
    // Deck of 2 clean cards, clean waiting room: a 3-damage effect refreshes exactly once
    let config = DeckSetup::new(2, 0).with_waiting_room(5, 0).build().unwrap();
    let damages =
        simulate_trials(&[DamageEvent::effect(3)], &config, 50, Some(8), &[]).unwrap();
    assert!(damages.iter().all(|&d| d == 4));
}

#[test]
fn test_soul_triggers_raise_damage() {
    // Every attacker card is a soul trigger and the defender never cancels
    let config = DeckSetup::new(40, 0).with_attacking_deck(10, 10).build().unwrap();
    let damages = simulate_trials(&attacks(&[2, 2]), &config, 20, Some(3), &[]).unwrap();
    assert!(damages.iter().all(|&d| d == 6));

    let effects = [DamageEvent::effect(2), DamageEvent::effect(2)];
    let damages = simulate_trials(&effects, &config, 20, Some(3), &[]).unwrap();
    assert!(damages.iter().all(|&d| d == 4));
}

#[test]
fn test_zero_trials_rejected() {
    let config = DeckConfig::new(50, 8).unwrap();
    assert_eq!(
        simulate_trials(&attacks(&[1]), &config, 0, None, &[]),
        Err(SimError::NoTrials)
    );
}

#[test]
fn test_trial_tuning_stays_in_bounds() {
    let config = DeckConfig::new(45, 8).unwrap();
    let tune = TuneConfig {
        target_error: 0.02,
        min_trials: 200,
        max_trials: 5000,
        seed: Some(99),
        ..TuneConfig::new(6)
    };

    let result = tune_trial_count(&attacks(&[3, 3, 3]), &config, &[], &tune).unwrap();

    assert!(result.trials >= 200);
    assert!(result.trials <= 5000);
    let n = result.history.len();
    if result.converged {
        assert!(n >= 2);
        assert!((result.history[n - 1] - result.history[n - 2]).abs() <= 0.02);
    } else {
        assert_eq!(result.trials, 5000);
    }
}

#[test]
fn test_run_simulation_with_auto_tune() {
    let mut config = SimConfig::tuned(&[3, 3, 3], 6).unwrap();
    if let Some(tune) = config.auto_tune.as_mut() {
        tune.min_trials = 200;
        tune.max_trials = 3200;
    }

    let report = run_simulation(&config).unwrap();
    let tuning = report.tuning.as_ref().unwrap();

    assert_eq!(report.trials, tuning.trials);
    assert!(report.probabilities.contains_key(&6));
    assert!(report.to_text().contains("AUTO-TUNING"));
}
