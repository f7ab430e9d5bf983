//! # lft-force
//!
//! The force half of the Logic Force pipeline.
//!
//! ```text
//!   ┌─────────────┐     ┌──────────────────┐     ┌──────────────────────┐
//!   │ RuleMatcher │ ──► │ ForceAggregator  │ ──► │ QuantumStateEncoder  │
//!   │ text+rules  │     │ scores → force   │     │ force → StateVector  │
//!   └─────────────┘     └──────────────────┘     └──────────────────────┘
//!          ▲                                                 │
//!          └──────────── LogicForceProcessor ────────────────┘
//! ```
//!
//! Every stage is a pure function of its inputs. The aggregator's threshold
//! only flags significance; it never changes the computed force.

#![deny(unsafe_code)]

pub mod aggregator;
pub mod encoder;
pub mod matcher;
pub mod processor;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use aggregator::{direction, Aggregate, ForceAggregator};
pub use encoder::{QuantumStateEncoder, RegionLayout};
pub use matcher::{tokenize, MatchReport, RuleMatcher};
pub use processor::LogicForceProcessor;
