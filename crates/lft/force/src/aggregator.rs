//! Force aggregator: folds per-category scores into one logical force.
//!
//! The threshold never alters the computed force. It only decides whether
//! the force is flagged `significant` for downstream gating.
//!
//! A force also has a direction in `[0, 2π]` that measures how well the
//! matched categories align with a requested context.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use lft_types::{check_unit, CategoryScores, LftError, LftResult, RuleSet, Weights};

/// Aggregated force for one set of scores.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Weighted mean of the scores (0.0 to 1.0).
    pub force: f64,
    /// Normalized gap between the top two weighted scores (0.0 to 1.0).
    pub confidence: f64,
    /// `force >= threshold`.
    pub significant: bool,
}

impl Aggregate {
    const ZERO: Aggregate = Aggregate {
        force: 0.0,
        confidence: 0.0,
        significant: false,
    };
}

/// Weighted-mean aggregator over borrowed category weights.
#[derive(Clone, Copy, Debug)]
pub struct ForceAggregator<'w> {
    weights: &'w Weights,
}

impl<'w> ForceAggregator<'w> {
    pub fn new(weights: &'w Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        self.weights
    }

    /// `w_c * s_c` for every category.
    pub fn weighted_scores(&self, scores: &CategoryScores) -> CategoryScores {
        scores
            .iter()
            .map(|(category, score)| (category.clone(), self.weights.get(category) * score))
            .collect()
    }

    /// Combine scores into force and confidence.
    pub fn aggregate(&self, scores: &CategoryScores, threshold: f64) -> LftResult<Aggregate> {
        check_unit("force_threshold", threshold)?;
        for (category, score) in scores {
            if !(0.0..=1.0).contains(score) {
                return Err(LftError::InvalidParameter(format!(
                    "score for {} must be in [0, 1], got {}",
                    category, score
                )));
            }
        }

        if scores.values().all(|s| *s == 0.0) {
            return Ok(Aggregate {
                significant: threshold == 0.0,
                ..Aggregate::ZERO
            });
        }

        let total_weight: f64 = scores.keys().map(|c| self.weights.get(c)).sum();
        if total_weight <= f64::EPSILON {
            return Ok(Aggregate {
                significant: threshold == 0.0,
                ..Aggregate::ZERO
            });
        }

        let weighted = self.weighted_scores(scores);
        let force = (weighted.values().sum::<f64>() / total_weight).clamp(0.0, 1.0);
        let confidence = dominance(weighted.values().copied());

        Ok(Aggregate {
            force,
            confidence,
            significant: force >= threshold,
        })
    }
}

/// Direction of a force relative to `context`.
///
/// - no context, or no category matched: 0
/// - none of the matched categories carries `context`: π
/// - otherwise `2π · aligned / matched`
///
/// A category counts as matched when its score is positive.
pub fn direction(scores: &CategoryScores, rules: &RuleSet, context: Option<&str>) -> f64 {
    let Some(context) = context.map(|c| c.trim().to_lowercase()) else {
        return 0.0;
    };
    let matched: Vec<&str> = scores
        .iter()
        .filter(|(_, score)| **score > 0.0)
        .map(|(category, _)| category.as_str())
        .collect();
    if matched.is_empty() {
        return 0.0;
    }
    let aligned = matched
        .iter()
        .filter(|category| rules.context(category) == Some(context.as_str()))
        .count();
    if aligned == 0 {
        PI
    } else {
        TAU * aligned as f64 / matched.len() as f64
    }
}

/// `(top - second) / top`, 0.0 when nothing is positive.
fn dominance(values: impl Iterator<Item = f64>) -> f64 {
    let (mut top, mut second) = (0.0_f64, 0.0_f64);
    for v in values {
        if v > top {
            second = top;
            top = v;
        } else if v > second {
            second = v;
        }
    }
    if top <= 0.0 {
        0.0
    } else {
        ((top - second) / top).clamp(0.0, 1.0)
    }
}
