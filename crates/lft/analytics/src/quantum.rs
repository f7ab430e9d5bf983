//! Entropy, coherence and expectation values of a state vector.
//!
//! Every function validates the normalization invariant first and returns
//! `InvalidState` when Σ|a|² is off by more than the tolerance.

use std::collections::BTreeMap;

use lft_types::{Complex64, LftResult, MeasurementResult, Observable, StateVector};

/// Amplitudes at or below this magnitude are ignored by phase alignment.
const NEGLIGIBLE_MAGNITUDE: f64 = 1e-12;

/// Stateless analytics over state vectors.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuantumAnalytics;

impl QuantumAnalytics {
    /// Shannon entropy of |a|² in bits.
    ///
    /// 0 for a basis state, `n` for a uniform state over `2^n` amplitudes.
    pub fn calculate_entropy(state: &StateVector) -> LftResult<f64> {
        state.validate_normalized()?;
        Ok(shannon_entropy(state.amplitudes().iter().map(Complex64::norm_sqr)))
    }

    /// Normalized l1-norm of coherence.
    ///
    /// Σ_{i≠j} |ρ_ij| for ρ = |ψ⟩⟨ψ| equals (Σ|a_i|)² - 1 for a normalized
    /// state; dividing by its maximum `d - 1` maps it into [0, 1].
    pub fn measure_coherence(state: &StateVector) -> LftResult<f64> {
        state.validate_normalized()?;
        let d = state.len();
        if d < 2 {
            return Ok(0.0);
        }
        let l1: f64 = state.amplitudes().iter().map(|a| a.norm()).sum();
        let off_diagonal = l1 * l1 - state.total_probability();
        Ok((off_diagonal / (d - 1) as f64).clamp(0.0, 1.0))
    }

    /// |Σ a_i| / Σ|a_i| over non-negligible amplitudes.
    ///
    /// 1 when every amplitude shares one phase, lower as phases spread out.
    pub fn phase_alignment(state: &StateVector) -> LftResult<f64> {
        state.validate_normalized()?;
        let (sum, l1) = state
            .amplitudes()
            .iter()
            .filter(|a| a.norm() > NEGLIGIBLE_MAGNITUDE)
            .fold((Complex64::new(0.0, 0.0), 0.0), |(sum, l1), a| (sum + a, l1 + a.norm()));
        if l1 <= NEGLIGIBLE_MAGNITUDE {
            return Ok(0.0);
        }
        Ok((sum.norm() / l1).clamp(0.0, 1.0))
    }

    /// ⟨ψ|O|ψ⟩ with its standard deviation as uncertainty.
    pub fn calculate_expectation(
        state: &StateVector,
        observable: &Observable,
    ) -> LftResult<MeasurementResult> {
        state.validate_normalized()?;
        let psi = state.amplitudes();
        let o_psi = observable.apply(psi)?;
        let o2_psi = observable.apply(&o_psi)?;

        let expectation = braket(psi, &o_psi).re;
        let second_moment = braket(psi, &o2_psi).re;
        let variance = (second_moment - expectation * expectation).max(0.0);

        let mut metadata = BTreeMap::new();
        metadata.insert("variance".to_string(), variance);

        Ok(MeasurementResult {
            value: expectation,
            uncertainty: variance.sqrt(),
            metadata,
        })
    }
}

/// -Σ p·log2(p), treating 0·log(0) as 0.
pub fn shannon_entropy(probabilities: impl IntoIterator<Item = f64>) -> f64 {
    let h: f64 = probabilities
        .into_iter()
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum();
    h.max(0.0)
}

fn braket(bra: &[Complex64], ket: &[Complex64]) -> Complex64 {
    bra.iter().zip(ket).map(|(b, k)| b.conj() * k).sum()
}
