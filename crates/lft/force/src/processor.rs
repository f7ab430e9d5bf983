//! Runs matcher, aggregator and encoder in sequence.

use tracing::debug;

use lft_types::{
    dimension, ForceResult, LftConfig, LftResult, RuleSet, StateVector, Weights,
};

use crate::aggregator::{direction, ForceAggregator};
use crate::encoder::QuantumStateEncoder;
use crate::matcher::{MatchReport, RuleMatcher};

/// Text → force → state vector.
///
/// Holds configuration only; rules and weights are supplied per call, so one
/// processor can be shared across threads without locking.
#[derive(Clone, Debug)]
pub struct LogicForceProcessor {
    config: LftConfig,
    matcher: RuleMatcher,
    encoder: QuantumStateEncoder,
}

impl LogicForceProcessor {
    /// Create a processor after validating `config`.
    pub fn new(config: LftConfig) -> LftResult<Self> {
        config.validate()?;
        Ok(Self {
            encoder: QuantumStateEncoder::from_config(&config),
            matcher: RuleMatcher::new(),
            config,
        })
    }

    pub fn config(&self) -> &LftConfig {
        &self.config
    }

    pub fn num_qubits(&self) -> u32 {
        self.config.num_qubits
    }

    /// Number of amplitudes in every produced state.
    pub fn state_space(&self) -> usize {
        // validated in `new`
        dimension(self.config.num_qubits).unwrap_or(0)
    }

    pub fn force_threshold(&self) -> f64 {
        self.config.force_threshold
    }

    pub fn encoder(&self) -> &QuantumStateEncoder {
        &self.encoder
    }

    /// Match `text` against `rules` with coverage details.
    pub fn analyze(&self, text: &str, rules: &RuleSet) -> MatchReport {
        self.matcher.analyze(text, rules)
    }

    /// Force for `text` under uniform weights.
    pub fn calculate_force(&self, text: &str, rules: &RuleSet) -> LftResult<f64> {
        let scores = self.matcher.match_text(text, rules);
        let weights = Weights::uniform();
        let aggregate =
            ForceAggregator::new(&weights).aggregate(&scores, self.config.force_threshold)?;
        Ok(aggregate.force)
    }

    /// Unweighted state for a bare force value.
    pub fn generate_quantum_state(&self, force: f64) -> LftResult<StateVector> {
        self.encoder.encode(force, self.config.num_qubits)
    }

    /// Full pipeline under uniform weights.
    pub fn process(&self, text: &str, rules: &RuleSet) -> LftResult<ForceResult> {
        self.process_weighted(text, rules, &Weights::uniform())
    }

    /// Full pipeline with category weights.
    ///
    /// The state places mass on each category region in proportion to
    /// `weight × score`.
    pub fn process_weighted(
        &self,
        text: &str,
        rules: &RuleSet,
        weights: &Weights,
    ) -> LftResult<ForceResult> {
        self.process_in_context(text, rules, weights, None)
    }

    /// Full pipeline with category weights and an optional context.
    ///
    /// With a context, the force direction is set from the context labels of
    /// the matched categories and drives the phase sweep of the encoding.
    pub fn process_in_context(
        &self,
        text: &str,
        rules: &RuleSet,
        weights: &Weights,
        context: Option<&str>,
    ) -> LftResult<ForceResult> {
        let report = self.matcher.analyze(text, rules);
        let uncertainty = 1.0 - report.coverage();
        let scores = report.scores;
        let aggregator = ForceAggregator::new(weights);
        let aggregate = aggregator.aggregate(&scores, self.config.force_threshold)?;
        let weighted = aggregator.weighted_scores(&scores);
        let direction = direction(&scores, rules, context);
        let num_qubits = self.config.num_qubits;
        let state_vector = match context {
            Some(_) => self
                .encoder
                .encode_directed(aggregate.force, &weighted, num_qubits, direction)?,
            None => self
                .encoder
                .encode_weighted(aggregate.force, &weighted, num_qubits)?,
        };

        debug!(
            force = aggregate.force,
            confidence = aggregate.confidence,
            significant = aggregate.significant,
            direction,
            uncertainty,
            categories = scores.len(),
            "computed logic force"
        );

        Ok(ForceResult {
            force: aggregate.force,
            confidence: aggregate.confidence,
            state_vector,
            scores,
            significant: aggregate.significant,
            direction,
            uncertainty,
        })
    }

    /// Blend `target` toward the state of `result`, weighted by its force.
    pub fn apply_force(&self, target: &StateVector, result: &ForceResult) -> LftResult<StateVector> {
        self.encoder
            .superpose(target, &result.state_vector, result.force)
    }
}
