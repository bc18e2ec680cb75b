//! Trial orchestration.
//!
//! One `ChaCha8Rng` is created per run and threaded through every trial in
//! order: trial `k` consumes exactly the draws its shuffles and triggers need
//! before trial `k + 1` starts. Trials must therefore not be reordered.

use super::config::SimConfig;
use super::report::SimReport;
use super::tuner::tune_trial_count;
use crate::damage::{resolve_event, DamageEvent};
use crate::deck::{AttackingDeckState, DeckConfig, DeckState};
use crate::error::{SimError, SimResult};
use crate::main_phase::MainPhaseStep;
use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub(crate) fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Run `trials` independent trials and return each trial's total damage.
///
/// Any error aborts the whole run; no partial results are returned.
pub fn simulate_trials(
    damage_sequence: &[DamageEvent],
    deck: &DeckConfig,
    trials: u32,
    seed: Option<u64>,
    main_phase_steps: &[MainPhaseStep],
) -> SimResult<Vec<u32>> {
    if trials == 0 {
        return Err(SimError::NoTrials);
    }

    let mut rng = seeded_rng(seed);
    let mut results = Vec::with_capacity(trials as usize);

    for trial_idx in 0..trials {
        let total = simulate_single_trial(damage_sequence, deck, main_phase_steps, &mut rng)?;
        trace!("Trial {}/{} - {} damage", trial_idx + 1, trials, total);
        results.push(total);
    }

    debug!(
        "Simulated {} trials of {} events ({} main phase steps)",
        trials,
        damage_sequence.len(),
        main_phase_steps.len()
    );
    Ok(results)
}

fn simulate_single_trial(
    damage_sequence: &[DamageEvent],
    deck_config: &DeckConfig,
    main_phase_steps: &[MainPhaseStep],
    rng: &mut ChaCha8Rng,
) -> SimResult<u32> {
    let mut deck = DeckState::new(deck_config, rng)?;
    let mut attacking = deck_config.attacking().map(AttackingDeckState::new);
    let mut total_damage = 0u32;

    for step in main_phase_steps {
        let dealt = step.apply(&mut deck, rng)?;
        total_damage = total_damage
            .checked_add(dealt)
            .ok_or(SimError::DamageOverflow)?;
    }

    for &event in damage_sequence {
        let outcome = resolve_event(event, &mut deck, attacking.as_mut(), rng)?;
        total_damage = total_damage
            .checked_add(outcome.total())
            .ok_or(SimError::DamageOverflow)?;
    }

    Ok(total_damage)
}

/// Simulate the full main phase and battle flow in one call.
pub fn run_main_phase_and_battle(
    damage_sequence: &[DamageEvent],
    deck: &DeckConfig,
    main_phase_steps: &[MainPhaseStep],
    trials: u32,
    seed: Option<u64>,
) -> SimResult<Vec<u32>> {
    simulate_trials(damage_sequence, deck, trials, seed, main_phase_steps)
}

/// Run several labelled main phases against the same battle sequence and
/// seed. Results come back in input order.
pub fn run_main_phase_scenarios(
    damage_sequence: &[DamageEvent],
    deck: &DeckConfig,
    scenarios: &[(&str, &[MainPhaseStep])],
    trials: u32,
    seed: Option<u64>,
) -> SimResult<Vec<(String, Vec<u32>)>> {
    scenarios
        .iter()
        .map(|&(label, steps)| {
            let damages = run_main_phase_and_battle(damage_sequence, deck, steps, trials, seed)?;
            Ok((label.to_string(), damages))
        })
        .collect()
}

/// Run the full simulation (optionally auto-tuning first) and return a report.
pub fn run_simulation(config: &SimConfig) -> SimResult<SimReport> {
    let tuning = config
        .auto_tune
        .as_ref()
        .map(|tune| {
            tune_trial_count(
                &config.damage_sequence,
                &config.deck,
                &config.main_phase_steps,
                tune,
            )
        })
        .transpose()?;
    let trials = tuning.as_ref().map_or(config.trials, |t| t.trials);

    let damages = simulate_trials(
        &config.damage_sequence,
        &config.deck,
        trials,
        config.seed,
        &config.main_phase_steps,
    )?;

    SimReport::from_damages(&damages, config.seed, tuning)
}
