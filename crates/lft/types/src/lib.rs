//! # lft-types
//!
//! Shared vocabulary for the Logic Force Theory pipeline.
//!
//! ```text
//!   text + RuleSet ──► CategoryScores ──► force ──► StateVector
//!                                                     │
//!                          ┌──────────────────────────┼────────────────┐
//!                          ▼                          ▼                ▼
//!                   ForceResult              DecisionResult    MeasurementResult
//! ```
//!
//! State vectors here are plain normalized complex vectors: a classical
//! numeric encoding analyzed with entropy and coherence metrics.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod results;
pub mod rules;
pub mod state;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use config::{check_unit, CalibrationConfig, LftConfig, MetricsConfig, QuantumBackend};
pub use error::{LftError, LftResult};
pub use results::{
    CalibrationSample, CategoryScores, DecisionResult, ForceResult, MeasurementResult,
};
pub use rules::{RuleSet, Weights};
pub use num_complex::Complex64;
pub use state::{dimension, Observable, StateVector, MAX_QUBITS, NORMALIZATION_TOLERANCE};
