//! Reads a category decision off a state vector.
//!
//! Text input is first run through the logic force processor with the
//! engine's current weights. The decision is the category whose basis region
//! carries the most probability mass.
//!
//! Shared state is limited to the bound rule set and the weights. Each call
//! takes a snapshot of both up front, so `update_rules` and `calibrate` never
//! affect a call already in flight.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use lft_analytics::shannon_entropy;
use lft_force::{LogicForceProcessor, RegionLayout};
use lft_types::{
    CalibrationSample, CategoryScores, DecisionResult, ForceResult, LftConfig, LftError,
    LftResult, RuleSet, StateVector, Weights,
};

use crate::calibrator::{CalibrationReport, Calibrator};

/// Masses closer than this are treated as tied; ties go to the
/// lexicographically smallest category.
pub const TIE_TOLERANCE: f64 = 1e-12;

/// Input accepted by [`QuantumDecisionSystem::process`].
#[derive(Clone, Copy, Debug)]
pub enum DecisionInput<'a> {
    Text(&'a str),
    State(&'a StateVector),
}

impl<'a> From<&'a str> for DecisionInput<'a> {
    fn from(text: &'a str) -> Self {
        DecisionInput::Text(text)
    }
}

impl<'a> From<&'a String> for DecisionInput<'a> {
    fn from(text: &'a String) -> Self {
        DecisionInput::Text(text.as_str())
    }
}

impl<'a> From<&'a StateVector> for DecisionInput<'a> {
    fn from(state: &'a StateVector) -> Self {
        DecisionInput::State(state)
    }
}

/// Decision engine bound to a rule set.
pub struct QuantumDecisionSystem {
    processor: LogicForceProcessor,
    calibrator: Calibrator,
    rules: RwLock<Arc<RuleSet>>,
    weights: RwLock<Weights>,
}

impl QuantumDecisionSystem {
    /// Bind `rules` under `config`. Fails if the config is invalid or the
    /// rule set has more categories than the state space can hold.
    pub fn new(rules: RuleSet, config: LftConfig) -> LftResult<Self> {
        let processor = LogicForceProcessor::new(config)?;
        RegionLayout::new(rules.categories(), processor.num_qubits())?;
        let calibrator = Calibrator::new(processor.config().calibration.clone());
        info!(
            categories = rules.len(),
            num_qubits = processor.num_qubits(),
            backend = %processor.config().quantum_backend,
            "decision system initialized"
        );
        Ok(Self {
            processor,
            calibrator,
            rules: RwLock::new(Arc::new(rules)),
            weights: RwLock::new(Weights::uniform()),
        })
    }

    /// Bind `rules` under the default configuration.
    pub fn with_rules(rules: RuleSet) -> LftResult<Self> {
        Self::new(rules, LftConfig::default())
    }

    pub fn config(&self) -> &LftConfig {
        self.processor.config()
    }

    pub fn processor(&self) -> &LogicForceProcessor {
        &self.processor
    }

    pub fn num_qubits(&self) -> u32 {
        self.processor.num_qubits()
    }

    /// Snapshot of the bound rule set.
    pub fn rules(&self) -> Arc<RuleSet> {
        Arc::clone(&self.rules.read())
    }

    /// Snapshot of the current weights.
    pub fn weights(&self) -> Weights {
        self.weights.read().clone()
    }

    /// Decide on text or on a ready-made state vector.
    pub fn process<'a>(&self, input: impl Into<DecisionInput<'a>>) -> LftResult<DecisionResult> {
        match input.into() {
            DecisionInput::Text(text) => Ok(self.evaluate(text)?.1),
            DecisionInput::State(state) => {
                let rules = self.rules();
                self.decide(state, &rules, true)
            }
        }
    }

    /// Run the full text pipeline, returning the force result alongside the decision.
    pub fn evaluate(&self, text: &str) -> LftResult<(ForceResult, DecisionResult)> {
        self.run(text, None)
    }

    /// Like [`evaluate`](Self::evaluate), with the force directed by how the
    /// matched categories align with `context`.
    pub fn evaluate_in_context(
        &self,
        text: &str,
        context: &str,
    ) -> LftResult<(ForceResult, DecisionResult)> {
        self.run(text, Some(context))
    }

    fn run(&self, text: &str, context: Option<&str>) -> LftResult<(ForceResult, DecisionResult)> {
        let rules = self.rules();
        let weights = self.weights();
        let force = self
            .processor
            .process_in_context(text, &rules, &weights, context)?;
        let decision = self.decide(&force.state_vector, &rules, force.significant)?;
        Ok((force, decision))
    }

    /// Decision label and probability for a state vector.
    pub fn measure_state(&self, state: &StateVector) -> LftResult<(Option<String>, f64)> {
        let result = self.process(state)?;
        Ok((result.decision, result.probability))
    }

    /// Atomically replace the bound rule set.
    pub fn update_rules(&self, new_rules: RuleSet) -> LftResult<()> {
        RegionLayout::new(new_rules.categories(), self.num_qubits())?;
        let categories = new_rules.len();
        *self.rules.write() = Arc::new(new_rules);
        info!(categories, "decision rules updated");
        Ok(())
    }

    /// Adjust weights from labeled samples against the bound rules.
    pub fn calibrate(&self, samples: &[CalibrationSample]) -> LftResult<CalibrationReport> {
        let rules = self.rules();
        let mut weights = self.weights.write();
        let report = self.calibrator.calibrate(samples, &rules, &mut weights)?;
        info!(
            applied = report.samples_applied,
            seen = report.samples_seen,
            mean_error = report.mean_error,
            "calibration applied"
        );
        Ok(report)
    }

    /// Explicitly set one category weight.
    pub fn set_weight(&self, category: impl Into<String>, weight: f64) -> LftResult<()> {
        self.weights.write().set(category, weight)
    }

    /// Return every category to the default weight.
    pub fn reset_weights(&self) {
        self.weights.write().reset();
        info!("decision weights reset");
    }

    fn decide(
        &self,
        state: &StateVector,
        rules: &RuleSet,
        significant: bool,
    ) -> LftResult<DecisionResult> {
        state.validate_normalized()?;
        let expected = self.processor.state_space();
        if state.len() != expected {
            return Err(LftError::DimensionMismatch {
                expected,
                actual: state.len(),
            });
        }

        let layout = RegionLayout::new(rules.categories(), self.num_qubits())?;
        let distribution = layout.category_masses(state)?;
        let (decision, probability) =
            select(&distribution, self.processor.config().significance_floor);
        let confidence = distribution_confidence(&distribution);

        debug!(
            decision = decision.as_deref().unwrap_or("<none>"),
            probability, confidence, "decision selected"
        );

        Ok(DecisionResult {
            decision,
            probability,
            quantum_state: state.clone(),
            distribution,
            confidence,
            significant,
        })
    }
}

/// Highest-mass category, ties to the smallest name; `None` below `floor`.
fn select(distribution: &CategoryScores, floor: f64) -> (Option<String>, f64) {
    let mut best: Option<(&str, f64)> = None;
    // BTreeMap order: earlier names win ties.
    for (name, mass) in distribution {
        match best {
            Some((_, best_mass)) if *mass <= best_mass + TIE_TOLERANCE => {}
            _ => best = Some((name.as_str(), *mass)),
        }
    }
    match best {
        Some((name, mass)) if mass > 0.0 && mass >= floor => (Some(name.to_string()), mass),
        Some((_, mass)) => (None, mass),
        None => (None, 0.0),
    }
}

/// 1 - normalized entropy of the category distribution.
fn distribution_confidence(distribution: &CategoryScores) -> f64 {
    let total: f64 = distribution.values().sum();
    if total <= f64::EPSILON {
        return 0.0;
    }
    let k = distribution.len();
    if k < 2 {
        return 1.0;
    }
    let entropy = shannon_entropy(distribution.values().map(|m| m / total));
    (1.0 - entropy / (k as f64).log2()).clamp(0.0, 1.0)
}
