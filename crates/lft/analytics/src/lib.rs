//! # lft-analytics
//!
//! Pure measurements over state vectors.
//!
//! - [`QuantumAnalytics`]: entropy, l1 coherence, phase alignment and
//!   observable expectation values of a single state.
//! - [`LogicMeasurements`]: fidelity-based impact between two states.
//!
//! All single-state functions reject vectors whose squared magnitudes do not
//! sum to 1 within [`lft_types::NORMALIZATION_TOLERANCE`].

#![deny(unsafe_code)]

pub mod measurements;
pub mod quantum;

pub use measurements::{ImpactReport, LogicMeasurements};
pub use quantum::{shannon_entropy, QuantumAnalytics};
