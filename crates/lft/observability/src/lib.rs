//! # lft-observability
//!
//! Metric recording for the Logic Force pipeline.
//!
//! ```text
//!   record_metric(name, v) ──► DashMap<name, series> ──► get_metric_stats(name)
//!                                  │ (bounded or not)        │
//!                                  ▼                         ▼
//!                             series(name)        NoData | {count, mean, min,
//!                                                          max, stddev}
//! ```
//!
//! Each series is locked per shard only for the append or the copy; summary
//! statistics are computed on the copy.

#![deny(unsafe_code)]

pub mod error;
pub mod recorder;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use error::{ObservabilityError, ObservabilityResult};
pub use recorder::{MetricPoint, MetricStats, MetricSummary, MetricsRecorder};
