//! State vectors and the complex amplitudes they are built from.
//!
//! A [`StateVector`] is a classical, normalized complex vector used as a
//! numeric feature representation. Nothing here simulates physical qubits.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{LftError, LftResult};

/// Tolerance for the Σ|a|² = 1 invariant.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// Largest supported qubit count. Keeps the dense vector at 65 536 amplitudes.
pub const MAX_QUBITS: u32 = 16;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

// ── State Vector ────────────────────────────────────────────────────────

/// Ordered sequence of complex amplitudes.
///
/// Construction does not enforce normalization so that callers can hand
/// arbitrary vectors to the analytics layer and get an `InvalidState` back.
/// Use [`StateVector::validate_normalized`] before relying on the invariant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Self {
        Self { amplitudes }
    }

    /// Build a vector with purely real amplitudes.
    pub fn from_real(values: &[f64]) -> Self {
        Self {
            amplitudes: values.iter().map(|v| Complex64::new(*v, 0.0)).collect(),
        }
    }

    /// The computational basis state `index` over `num_qubits` qubits.
    pub fn basis(num_qubits: u32, index: usize) -> LftResult<Self> {
        let dim = dimension(num_qubits)?;
        if index >= dim {
            return Err(LftError::InvalidParameter(format!(
                "basis index {} outside state space of size {}",
                index, dim
            )));
        }
        let mut amplitudes = vec![ZERO; dim];
        amplitudes[index] = ONE;
        Ok(Self { amplitudes })
    }

    /// Uniform superposition over all `2^num_qubits` basis states.
    pub fn uniform(num_qubits: u32) -> LftResult<Self> {
        let dim = dimension(num_qubits)?;
        let amp = 1.0 / (dim as f64).sqrt();
        Ok(Self {
            amplitudes: vec![Complex64::new(amp, 0.0); dim],
        })
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Qubit count when the length is a power of two.
    pub fn num_qubits(&self) -> Option<u32> {
        let len = self.amplitudes.len();
        if len.is_power_of_two() {
            Some(len.trailing_zeros())
        } else {
            None
        }
    }

    /// Squared magnitudes, one per amplitude.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Σ|a|²
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    pub fn is_normalized(&self) -> bool {
        (self.total_probability() - 1.0).abs() <= NORMALIZATION_TOLERANCE
    }

    /// Check that the vector is non-empty, finite and normalized.
    pub fn validate_normalized(&self) -> LftResult<()> {
        if self.amplitudes.is_empty() {
            return Err(LftError::EmptyInput("state vector has no amplitudes".into()));
        }
        if !self.amplitudes.iter().all(|a| a.is_finite()) {
            return Err(LftError::InvalidState(
                "state vector contains non-finite amplitudes".into(),
            ));
        }
        let total = self.total_probability();
        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(LftError::InvalidState(format!(
                "sum of squared magnitudes is {:.12}, expected 1",
                total
            )));
        }
        Ok(())
    }

    /// Return a rescaled copy with unit norm.
    pub fn normalized(&self) -> LftResult<Self> {
        if self.amplitudes.is_empty() {
            return Err(LftError::EmptyInput("state vector has no amplitudes".into()));
        }
        let norm = self.total_probability().sqrt();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return Err(LftError::InvalidState(format!(
                "cannot normalize vector with norm {}",
                norm
            )));
        }
        Ok(Self {
            amplitudes: self.amplitudes.iter().map(|a| a.scale(1.0 / norm)).collect(),
        })
    }

    /// ⟨self|other⟩ (conjugate-linear in `self`).
    pub fn inner_product(&self, other: &StateVector) -> LftResult<Complex64> {
        if self.len() != other.len() {
            return Err(LftError::DimensionMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }
}

/// `2^num_qubits`, rejecting qubit counts outside `1..=MAX_QUBITS`.
pub fn dimension(num_qubits: u32) -> LftResult<usize> {
    if num_qubits < 1 || num_qubits > MAX_QUBITS {
        return Err(LftError::InvalidParameter(format!(
            "num_qubits must be in 1..={}, got {}",
            MAX_QUBITS, num_qubits
        )));
    }
    Ok(1usize << num_qubits)
}

// ── Observable ──────────────────────────────────────────────────────────

/// Dense square operator used for expectation values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observable {
    dim: usize,
    /// Row-major entries, `dim * dim` long.
    entries: Vec<Complex64>,
}

impl Observable {
    /// Build from rows. Every row must have as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> LftResult<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(LftError::EmptyInput("observable has no rows".into()));
        }
        let mut entries = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(LftError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
            entries.extend(row);
        }
        Ok(Self { dim, entries })
    }

    /// Diagonal operator with the given real eigenvalues.
    pub fn diagonal(values: &[f64]) -> LftResult<Self> {
        let dim = values.len();
        if dim == 0 {
            return Err(LftError::EmptyInput("observable has no rows".into()));
        }
        let mut entries = vec![ZERO; dim * dim];
        for (i, v) in values.iter().enumerate() {
            entries[i * dim + i] = Complex64::new(*v, 0.0);
        }
        Ok(Self { dim, entries })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entry(&self, row: usize, col: usize) -> Complex64 {
        self.entries[row * self.dim + col]
    }

    /// O·v
    pub fn apply(&self, vector: &[Complex64]) -> LftResult<Vec<Complex64>> {
        if vector.len() != self.dim {
            return Err(LftError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }
        Ok((0..self.dim)
            .map(|row| {
                self.entries[row * self.dim..(row + 1) * self.dim]
                    .iter()
                    .zip(vector)
                    .map(|(o, v)| o * v)
                    .sum()
            })
            .collect())
    }
}
