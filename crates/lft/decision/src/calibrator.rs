//! Calibration: nudges category weights toward labeled examples.
//!
//! For each sample the matcher's scores are weighted into a predicted
//! distribution `q`. The labeled category gains `lr · (1 - q_label)` (capped
//! at `max_weight`); every other matched category loses `lr · q_c` (floored at
//! `min_weight`). Samples are applied in order, so a fixed sample sequence
//! always yields the same weights.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lft_force::{ForceAggregator, RuleMatcher};
use lft_types::{CalibrationConfig, CalibrationSample, LftResult, RuleSet, Weights};

/// Aggregate outcome of one calibration call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub samples_seen: usize,
    pub samples_applied: usize,
    /// Label is not a category of the bound rule set.
    pub skipped_unknown_label: usize,
    /// Text matched no category, so there is no prediction to correct.
    pub skipped_no_match: usize,
    /// Mean of `1 - q_label` over applied samples.
    pub mean_error: f64,
}

/// Gradient-style weight updater.
#[derive(Clone, Debug)]
pub struct Calibrator {
    config: CalibrationConfig,
    matcher: RuleMatcher,
}

impl Calibrator {
    pub fn new(config: CalibrationConfig) -> Self {
        Self {
            config,
            matcher: RuleMatcher::new(),
        }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Fold `samples` into `weights`.
    pub fn calibrate(
        &self,
        samples: &[CalibrationSample],
        rules: &RuleSet,
        weights: &mut Weights,
    ) -> LftResult<CalibrationReport> {
        let mut report = CalibrationReport {
            samples_seen: samples.len(),
            ..CalibrationReport::default()
        };
        let mut total_error = 0.0;

        for sample in samples {
            if !rules.contains(&sample.label) {
                warn!(label = %sample.label, "calibration sample label is not a known category");
                report.skipped_unknown_label += 1;
                continue;
            }

            let scores = self.matcher.match_text(&sample.text, rules);
            let weighted = ForceAggregator::new(weights).weighted_scores(&scores);
            let total: f64 = weighted.values().sum();
            if total <= f64::EPSILON {
                debug!(label = %sample.label, "calibration sample matched nothing");
                report.skipped_no_match += 1;
                continue;
            }

            let lr = self.config.learning_rate;
            for (category, mass) in &weighted {
                let q = mass / total;
                let current = weights.get(category);
                if category == &sample.label {
                    let error = 1.0 - q;
                    total_error += error;
                    // never lowers the labeled weight, even above the cap
                    let cap = self.config.max_weight.max(current);
                    weights.set(category.clone(), (current + lr * error).min(cap))?;
                } else if scores.get(category).copied().unwrap_or(0.0) > 0.0 {
                    let floor = self.config.min_weight.min(current);
                    weights.set(category.clone(), (current - lr * q).max(floor))?;
                }
            }
            report.samples_applied += 1;
        }

        if report.samples_applied > 0 {
            report.mean_error = total_error / report.samples_applied as f64;
        }
        debug!(
            seen = report.samples_seen,
            applied = report.samples_applied,
            mean_error = report.mean_error,
            "calibration pass complete"
        );
        Ok(report)
    }
}
