//! Monte Carlo damage simulator.
//!
//! Runs thousands of independent trials of one battle sequence to estimate:
//! - The distribution of total damage dealt
//! - P(damage >= X) for every threshold X
//! - How many trials are needed before that estimate settles
//!
//! Every trial of a run draws from one seeded `ChaCha8Rng`, in order, so a run
//! is a pure function of its seed and inputs.

mod config;
mod report;
mod runner;
mod tuner;

pub use config::SimConfig;
pub use report::{cumulative_probability_at_least, SimReport};
pub use runner::{
    run_main_phase_and_battle, run_main_phase_scenarios, run_simulation, simulate_trials,
};
pub use tuner::{tune_trial_count, TuneConfig, TuneResult};
