//! Probability aggregation and report generation.

use super::tuner::TuneResult;
use crate::error::{SimError, SimResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Empirical P(damage >= threshold) for each threshold.
///
/// The result is non-increasing in the threshold for any sample.
pub fn cumulative_probability_at_least(
    damages: &[u32],
    thresholds: impl IntoIterator<Item = u32>,
) -> SimResult<BTreeMap<u32, f64>> {
    if damages.is_empty() {
        return Err(SimError::EmptySample);
    }

    let total_trials = damages.len() as f64;
    Ok(thresholds
        .into_iter()
        .map(|threshold| {
            let count = damages.iter().filter(|&&dmg| dmg >= threshold).count();
            (threshold, count as f64 / total_trials)
        })
        .collect())
}

/// Aggregated results from one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub trials: u32,
    pub seed: Option<u64>,

    pub mean_damage: f64,
    pub min_damage: u32,
    pub median_damage: u32,
    pub max_damage: u32,

    /// P(damage >= X) for X in 0..=max_damage
    pub probabilities: BTreeMap<u32, f64>,

    /// Present when the trial count was auto-tuned
    pub tuning: Option<TuneResult>,
}

impl SimReport {
    /// Create a new report from per-trial damage totals.
    pub fn from_damages(
        damages: &[u32],
        seed: Option<u64>,
        tuning: Option<TuneResult>,
    ) -> SimResult<Self> {
        let mut sorted = damages.to_vec();
        sorted.sort_unstable();
        let (Some(&min_damage), Some(&max_damage)) = (sorted.first(), sorted.last()) else {
            return Err(SimError::EmptySample);
        };
        let median_damage = sorted[sorted.len() / 2];
        let mean_damage =
            damages.iter().map(|&d| f64::from(d)).sum::<f64>() / damages.len() as f64;

        let probabilities = cumulative_probability_at_least(damages, 0..=max_damage)?;

        Ok(Self {
            trials: damages.len() as u32,
            seed,
            mean_damage,
            min_damage,
            median_damage,
            max_damage,
            probabilities,
            tuning,
        })
    }

    /// Generate a text report with a bar per damage threshold.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    DAMAGE SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        match self.seed {
            Some(seed) => report.push_str(&format!("Trials: {}  (seed {})\n\n", self.trials, seed)),
            None => report.push_str(&format!("Trials: {}\n\n", self.trials)),
        }

        report.push_str("── DAMAGE ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Mean:    {:.2}\n", self.mean_damage));
        report.push_str(&format!("  Min:     {}\n", self.min_damage));
        report.push_str(&format!("  Median:  {}\n", self.median_damage));
        report.push_str(&format!("  Max:     {}\n\n", self.max_damage));

        report.push_str("── P(DAMAGE >= X) ───────────────────────────────────────────────\n");
        for (threshold, probability) in &self.probabilities {
            let pct = probability * 100.0;
            let bar: String = "█".repeat((pct / 2.0) as usize);
            report.push_str(&format!("  {:3}: {:>5.1}% {}\n", threshold, pct, bar));
        }

        if let Some(tuning) = &self.tuning {
            report.push_str("\n── AUTO-TUNING ──────────────────────────────────────────────────\n");
            let status = if tuning.converged {
                "converged"
            } else {
                "hit trial limit"
            };
            report.push_str(&format!("  Trials:    {} ({})\n", tuning.trials, status));
            let estimates: Vec<String> =
                tuning.history.iter().map(|p| format!("{:.4}", p)).collect();
            report.push_str(&format!("  Estimates: {}\n", estimates.join(", ")));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_probability() {
        let damages = [0, 1, 1, 3];
        let probs = cumulative_probability_at_least(&damages, 0..=4).unwrap();

        assert_eq!(probs[&0], 1.0);
        assert_eq!(probs[&1], 0.75);
        assert_eq!(probs[&2], 0.25);
        assert_eq!(probs[&3], 0.25);
        assert_eq!(probs[&4], 0.0);
    }

    #[test]
    fn test_empty_sample_rejected() {
        assert_eq!(
            cumulative_probability_at_least(&[], [1]),
            Err(SimError::EmptySample)
        );
        assert!(SimReport::from_damages(&[], None, None).is_err());
    }

    #[test]
    fn test_report_generation() {
        let report = SimReport::from_damages(&[2, 0, 5, 3, 2], Some(7), None).unwrap();

        assert_eq!(report.trials, 5);
        assert_eq!(report.min_damage, 0);
        assert_eq!(report.median_damage, 2);
        assert_eq!(report.max_damage, 5);
        assert!((report.mean_damage - 2.4).abs() < 1e-9);
        assert_eq!(report.probabilities.len(), 6);

        let text = report.to_text();
        assert!(text.contains("Trials: 5  (seed 7)"));
        assert!(text.contains("  0: 100.0%"));
        assert!(!text.contains("AUTO-TUNING"));
    }

    #[test]
    fn test_report_includes_tuning() {
        let tuning = TuneResult {
            trials: 1000,
            history: vec![0.5, 0.505],
            converged: true,
        };
        let report = SimReport::from_damages(&[1, 2], None, Some(tuning)).unwrap();

        let text = report.to_text();
        assert!(text.contains("1000 (converged)"));
        assert!(text.contains("0.5000, 0.5050"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["trials"], 2);
        assert_eq!(json["tuning"]["trials"], 1000);
        assert_eq!(json["probabilities"]["2"], 0.5);
    }
}
