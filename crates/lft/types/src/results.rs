//! Values produced by the pipeline. All of them are immutable once built.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::StateVector;

/// Per-category match scores, keyed by category name.
pub type CategoryScores = BTreeMap<String, f64>;

/// Output of the logic force processor for one piece of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceResult {
    /// Weighted mean of the category scores (0.0 to 1.0).
    pub force: f64,
    /// How decisively one category dominates (0.0 to 1.0).
    pub confidence: f64,
    /// Encoded state for this force.
    pub state_vector: StateVector,
    /// Raw per-category scores from the rule matcher.
    pub scores: CategoryScores,
    /// Whether `force` reached the configured threshold.
    pub significant: bool,
    /// Alignment with the requested context, radians in `[0, 2π]`.
    /// 0 when no context was given.
    #[serde(default)]
    pub direction: f64,
    /// Share of input tokens no keyword explained (1.0 for empty text).
    #[serde(default)]
    pub uncertainty: f64,
}

/// Output of the decision engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Winning category, or `None` when nothing cleared the significance floor.
    pub decision: Option<String>,
    /// Probability mass of the winning category (or the best mass found).
    pub probability: f64,
    /// State the decision was read from.
    pub quantum_state: StateVector,
    /// Probability mass of every category region.
    pub distribution: CategoryScores,
    /// 1 minus the normalized entropy of the category distribution.
    pub confidence: f64,
    /// Force gate: whether the input force reached the threshold.
    /// Always `true` for decisions read directly from a state vector.
    pub significant: bool,
}

impl DecisionResult {
    /// Categories other than the decision, ordered by descending mass.
    pub fn alternatives(&self) -> Vec<(&str, f64)> {
        let mut alts: Vec<(&str, f64)> = self
            .distribution
            .iter()
            .filter(|(name, _)| self.decision.as_deref() != Some(name.as_str()))
            .map(|(name, mass)| (name.as_str(), *mass))
            .collect();
        alts.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        alts
    }
}

/// A scalar measurement with its uncertainty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub value: f64,
    pub uncertainty: f64,
    pub metadata: BTreeMap<String, f64>,
}

/// A labeled example for calibration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub text: String,
    pub label: String,
}

impl CalibrationSample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}
