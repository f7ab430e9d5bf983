//! # lft-decision
//!
//! Turns state vectors into category decisions.
//!
//! ```text
//!   text ──► LogicForceProcessor ──► StateVector ──┐
//!                 ▲  (weights)                     ▼
//!                 │                       RegionLayout masses
//!             Calibrator                           │
//!                 ▲                                ▼
//!      labeled samples               argmax + significance floor
//!                                                  │
//!                                                  ▼
//!                                           DecisionResult
//! ```
//!
//! [`QuantumDecisionSystem`] is `Send + Sync`. The bound rule set and the
//! weights sit behind `parking_lot` locks and every call works on a snapshot.

#![deny(unsafe_code)]

pub mod calibrator;
pub mod engine;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use calibrator::{CalibrationReport, Calibrator};
pub use engine::{DecisionInput, QuantumDecisionSystem, TIE_TOLERANCE};
