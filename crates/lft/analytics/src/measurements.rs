//! Measurements comparing two state vectors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use lft_types::{LftError, LftResult, MeasurementResult, StateVector};

use crate::quantum::QuantumAnalytics;

/// Summary of how a transformation changed a state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    /// Fidelity between the initial and final states.
    pub impact: f64,
    /// Purity difference between the two states.
    pub uncertainty: f64,
    /// Coherence of the final state minus coherence of the initial state.
    pub coherence_change: f64,
    /// Entropy of the final state, in bits.
    pub final_entropy: f64,
}

/// Measurements over pairs of states.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogicMeasurements;

impl LogicMeasurements {
    /// Fidelity |⟨initial|final⟩|² with the purity difference as uncertainty.
    ///
    /// Purity here is ⟨ψ|ψ⟩, so unnormalized inputs are accepted and show up
    /// as a non-zero uncertainty.
    pub fn measure_logic_impact(
        initial: &StateVector,
        final_state: &StateVector,
    ) -> LftResult<MeasurementResult> {
        if initial.is_empty() || final_state.is_empty() {
            return Err(LftError::EmptyInput(
                "impact measurement needs non-empty states".into(),
            ));
        }
        let overlap = initial.inner_product(final_state)?;
        let fidelity = overlap.norm_sqr();
        let initial_purity = initial.total_probability();
        let final_purity = final_state.total_probability();

        let mut metadata = BTreeMap::new();
        metadata.insert("initial_purity".to_string(), initial_purity);
        metadata.insert("final_purity".to_string(), final_purity);

        Ok(MeasurementResult {
            value: fidelity,
            uncertainty: (final_purity - initial_purity).abs(),
            metadata,
        })
    }

    /// Impact, coherence change and final entropy for normalized states.
    pub fn impact_report(initial: &StateVector, final_state: &StateVector) -> LftResult<ImpactReport> {
        let impact = Self::measure_logic_impact(initial, final_state)?;
        let coherence_change = QuantumAnalytics::measure_coherence(final_state)?
            - QuantumAnalytics::measure_coherence(initial)?;
        let final_entropy = QuantumAnalytics::calculate_entropy(final_state)?;

        debug!(
            impact = impact.value,
            coherence_change, final_entropy, "measured logic impact"
        );

        Ok(ImpactReport {
            impact: impact.value,
            uncertainty: impact.uncertainty,
            coherence_change,
            final_entropy,
        })
    }
}
