//! Quantum state encoder: maps a scalar force onto a normalized state vector.
//!
//! ## Layout
//!
//! ```text
//!   index:   0        1 ........ r1   r1+1 ...... r2   ...   2^n - 1
//!          ┌──────┬────────────────┬─────────────────┬─────┬────────┐
//!          │ null │  category #1   │   category #2   │ ... │  #k    │
//!          └──────┴────────────────┴─────────────────┴─────┴────────┘
//!   mass:   cos²θ   sin²θ · w1/Σw    sin²θ · w2/Σw            ...
//! ```
//!
//! with `θ = force · π/2`. Force 0 is exactly the null basis state; force 1
//! puts all mass into the category regions. This is a deterministic classical
//! embedding used as a feature representation.
//!
//! The phase backend rotates amplitude `j` by `sweep · j / (2^n - 1)`. The
//! sweep is the force direction when one is supplied, `π · force` otherwise.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use lft_types::{
    check_unit, dimension, CategoryScores, Complex64, LftConfig, LftError, LftResult,
    QuantumBackend, StateVector, NORMALIZATION_TOLERANCE,
};

// ── Region Layout ───────────────────────────────────────────────────────

/// Assignment of contiguous basis index ranges to categories.
///
/// Index 0 is the null state and never belongs to a category. Categories are
/// laid out in lexicographic order; region sizes differ by at most one, with
/// earlier categories taking the remainder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLayout {
    dim: usize,
    regions: Vec<(String, Range<usize>)>,
}

impl RegionLayout {
    /// Lay out `categories` over `2^num_qubits` basis states.
    pub fn new<'a, I>(categories: I, num_qubits: u32) -> LftResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::for_dimension(categories, dimension(num_qubits)?)
    }

    /// Lay out `categories` over a state space of size `dim` (at least 2).
    pub fn for_dimension<'a, I>(categories: I, dim: usize) -> LftResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if dim < 2 {
            return Err(LftError::InvalidParameter(format!(
                "state space of size {} has no room for category regions",
                dim
            )));
        }
        let mut names: Vec<&str> = categories.into_iter().collect();
        names.sort_unstable();
        names.dedup();

        let slots = dim - 1;
        let k = names.len();
        if k > slots {
            return Err(LftError::InvalidParameter(format!(
                "{} categories do not fit into {} non-null basis states; raise num_qubits",
                k, slots
            )));
        }

        let mut regions = Vec::with_capacity(k);
        if k > 0 {
            let base = slots / k;
            let remainder = slots % k;
            let mut start = 1;
            for (i, name) in names.into_iter().enumerate() {
                let size = base + usize::from(i < remainder);
                regions.push((name.to_string(), start..start + size));
                start += size;
            }
        }
        Ok(Self { dim, regions })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn region(&self, category: &str) -> Option<Range<usize>> {
        self.regions
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, range)| range.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Range<usize>)> {
        self.regions
            .iter()
            .map(|(name, range)| (name.as_str(), range.clone()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Σ|a|² over each category's region.
    pub fn category_masses(&self, state: &StateVector) -> LftResult<CategoryScores> {
        if state.len() != self.dim {
            return Err(LftError::DimensionMismatch {
                expected: self.dim,
                actual: state.len(),
            });
        }
        let amplitudes = state.amplitudes();
        Ok(self
            .regions
            .iter()
            .map(|(name, range)| {
                let mass = amplitudes[range.clone()].iter().map(Complex64::norm_sqr).sum();
                (name.clone(), mass)
            })
            .collect())
    }

    /// Mass of the null state.
    pub fn null_mass(&self, state: &StateVector) -> f64 {
        state.amplitudes().first().map(Complex64::norm_sqr).unwrap_or(0.0)
    }
}

// ── Encoder ─────────────────────────────────────────────────────────────

/// Encodes forces into state vectors using the configured backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantumStateEncoder {
    backend: QuantumBackend,
    coherence_check: bool,
}

impl Default for QuantumStateEncoder {
    fn default() -> Self {
        Self::new(QuantumBackend::default(), true)
    }
}

impl QuantumStateEncoder {
    pub fn new(backend: QuantumBackend, coherence_check: bool) -> Self {
        Self {
            backend,
            coherence_check,
        }
    }

    pub fn from_config(config: &LftConfig) -> Self {
        Self::new(config.quantum_backend, config.coherence_check)
    }

    pub fn backend(&self) -> QuantumBackend {
        self.backend
    }

    /// Encode `force` with mass spread uniformly over all non-null states.
    pub fn encode(&self, force: f64, num_qubits: u32) -> LftResult<StateVector> {
        let dim = dimension(num_qubits)?;
        validate_force(force)?;
        let share = 1.0 / (dim - 1) as f64;
        let mut fractions = vec![share; dim];
        fractions[0] = 0.0;
        self.assemble(force, &fractions, PI * force)
    }

    /// Encode `force` with mass split across category regions in proportion
    /// to `weights` (typically weight × score per category).
    pub fn encode_weighted(
        &self,
        force: f64,
        weights: &CategoryScores,
        num_qubits: u32,
    ) -> LftResult<StateVector> {
        validate_force(force)?;
        self.encode_directed(force, weights, num_qubits, PI * force)
    }

    /// Like [`encode_weighted`](Self::encode_weighted), with the phase sweep
    /// taken from `direction` (radians in `[0, 2π]`).
    pub fn encode_directed(
        &self,
        force: f64,
        weights: &CategoryScores,
        num_qubits: u32,
        direction: f64,
    ) -> LftResult<StateVector> {
        let dim = dimension(num_qubits)?;
        validate_force(force)?;
        if !direction.is_finite() || !(0.0..=TAU).contains(&direction) {
            return Err(LftError::InvalidParameter(format!(
                "direction must be in [0, 2π], got {}",
                direction
            )));
        }
        for (category, w) in weights {
            if !w.is_finite() || *w < 0.0 {
                return Err(LftError::InvalidParameter(format!(
                    "weight for {} must be finite and non-negative, got {}",
                    category, w
                )));
            }
        }

        let layout = RegionLayout::for_dimension(weights.keys().map(String::as_str), dim)?;
        let total: f64 = weights.values().sum();

        let mut fractions = vec![0.0; dim];
        if total <= f64::EPSILON {
            let share = 1.0 / (dim - 1) as f64;
            fractions[1..].fill(share);
        } else {
            for (category, range) in layout.iter() {
                let w = weights.get(category).copied().unwrap_or(0.0);
                let per_index = (w / total) / range.len() as f64;
                fractions[range].fill(per_index);
            }
        }
        self.assemble(force, &fractions, direction)
    }

    /// Normalized `alpha · force_state + (1 - alpha) · target`.
    pub fn superpose(
        &self,
        target: &StateVector,
        force_state: &StateVector,
        alpha: f64,
    ) -> LftResult<StateVector> {
        check_unit("alpha", alpha)?;
        if target.len() != force_state.len() {
            return Err(LftError::DimensionMismatch {
                expected: target.len(),
                actual: force_state.len(),
            });
        }
        let mixed = StateVector::from_amplitudes(
            force_state
                .amplitudes()
                .iter()
                .zip(target.amplitudes())
                .map(|(f, t)| f.scale(alpha) + t.scale(1.0 - alpha))
                .collect(),
        );
        let state = mixed.normalized()?;
        self.check_coherence(&state)?;
        Ok(state)
    }

    /// Normalization sanity check, active when `coherence_check` is enabled.
    pub fn check_coherence(&self, state: &StateVector) -> LftResult<()> {
        if !self.coherence_check {
            return Ok(());
        }
        let total = state.total_probability();
        if !total.is_finite() || (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(LftError::CoherenceViolation(format!(
                "encoded state has total probability {:.12}",
                total
            )));
        }
        Ok(())
    }

    /// Build amplitudes: index 0 gets `cos θ`, index j gets `sin θ · sqrt(fractions[j])`.
    fn assemble(&self, force: f64, fractions: &[f64], sweep: f64) -> LftResult<StateVector> {
        let dim = fractions.len();
        let (sin, cos) = (force * FRAC_PI_2).sin_cos();
        let last = (dim - 1) as f64;

        let amplitudes = (0..dim)
            .map(|j| {
                let magnitude = if j == 0 { cos } else { sin * fractions[j].sqrt() };
                match self.backend {
                    QuantumBackend::Angle => Complex64::new(magnitude, 0.0),
                    QuantumBackend::Phase => {
                        Complex64::from_polar(magnitude, sweep * j as f64 / last)
                    }
                }
            })
            .collect();

        let state = StateVector::from_amplitudes(amplitudes);
        self.check_coherence(&state)?;
        debug!(force, dim, backend = %self.backend, "encoded state vector");
        Ok(state)
    }
}

fn validate_force(force: f64) -> LftResult<()> {
    check_unit("force", force)
}
