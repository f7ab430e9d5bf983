//! Named metric series with summary statistics.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use lft_types::{DecisionResult, ForceResult, MetricsConfig};

use crate::error::{ObservabilityError, ObservabilityResult};

// ── Metric names used by the pipeline recorders ─────────────────────────

pub const FORCE: &str = "lft.force";
pub const FORCE_CONFIDENCE: &str = "lft.force.confidence";
pub const DECISION_PROBABILITY: &str = "lft.decision.probability";
pub const DECISION_CONFIDENCE: &str = "lft.decision.confidence";
/// 1.0 when a decision was made, 0.0 when it was suppressed.
pub const DECISION_MADE: &str = "lft.decision.made";

// ── Points and Series ───────────────────────────────────────────────────

/// One recorded observation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Ordered points of one metric, optionally bounded.
#[derive(Clone, Debug, Default)]
struct MetricSeries {
    points: VecDeque<MetricPoint>,
    max_points: Option<usize>,
}

impl MetricSeries {
    fn new(max_points: Option<usize>) -> Self {
        Self {
            points: VecDeque::new(),
            max_points,
        }
    }

    fn push(&mut self, point: MetricPoint) {
        if let Some(max) = self.max_points {
            while self.points.len() >= max {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

// ── Statistics ──────────────────────────────────────────────────────────

/// Summary of a non-empty series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub stddev: f64,
}

/// Statistics for a metric name.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricStats {
    /// Unknown name or empty series.
    NoData,
    Summary(MetricSummary),
}

impl MetricStats {
    pub fn summary(&self) -> Option<&MetricSummary> {
        match self {
            MetricStats::NoData => None,
            MetricStats::Summary(summary) => Some(summary),
        }
    }

    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return MetricStats::NoData;
        }
        let count = values.len();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Accumulate in units of a power of two near the largest magnitude so
        // sums and squares of finite values stay finite. Dividing by a power
        // of two is exact.
        let scale = power_of_two_scale(min.abs().max(max.abs()));
        let mean = values.iter().map(|v| v / scale).sum::<f64>() / count as f64;
        let variance = values
            .iter()
            .map(|v| (v / scale - mean).powi(2))
            .sum::<f64>()
            / count as f64;
        MetricStats::Summary(MetricSummary {
            count,
            mean: mean * scale,
            min,
            max,
            stddev: variance.sqrt() * scale,
        })
    }
}

fn power_of_two_scale(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        return 1.0;
    }
    let exponent = magnitude.log2().floor().clamp(-1000.0, 1023.0) as i32;
    2f64.powi(exponent)
}

// ── Recorder ────────────────────────────────────────────────────────────

/// Thread-safe metrics store.
///
/// Constructed explicitly and shared by reference or `Arc`; there is no
/// global instance.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    series: DashMap<String, MetricSeries>,
    max_points: Option<usize>,
}

impl MetricsRecorder {
    /// Recorder with unbounded series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that keeps at most `max_points` per series, dropping the oldest.
    /// A bound of 0 is rejected.
    pub fn with_retention(max_points: usize) -> ObservabilityResult<Self> {
        if max_points == 0 {
            return Err(ObservabilityError::InvalidValue(
                "max_points_per_series must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            series: DashMap::new(),
            max_points: Some(max_points),
        })
    }

    pub fn from_config(config: &MetricsConfig) -> ObservabilityResult<Self> {
        match config.max_points_per_series {
            Some(max) => Self::with_retention(max),
            None => Ok(Self::new()),
        }
    }

    pub fn max_points(&self) -> Option<usize> {
        self.max_points
    }

    /// Append `value` to `name` with the current UTC time.
    pub fn record_metric(&self, name: &str, value: f64) -> ObservabilityResult<()> {
        self.record_at(name, value, Utc::now())
    }

    /// Append `value` to `name` with an explicit timestamp.
    pub fn record_at(
        &self,
        name: &str,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> ObservabilityResult<()> {
        if !value.is_finite() {
            return Err(ObservabilityError::InvalidValue(format!(
                "{} = {}",
                name, value
            )));
        }
        let max_points = self.max_points;
        self.series
            .entry(name.to_string())
            .or_insert_with(|| MetricSeries::new(max_points))
            .push(MetricPoint { timestamp, value });
        Ok(())
    }

    /// Summary statistics for `name`.
    pub fn get_metric_stats(&self, name: &str) -> MetricStats {
        // copy out so the shard lock is released before computing
        let values = self.series.get(name).map(|s| s.values());
        match values {
            Some(values) => MetricStats::from_values(&values),
            None => MetricStats::NoData,
        }
    }

    /// Copy of the points recorded under `name`, oldest first.
    pub fn series(&self, name: &str) -> ObservabilityResult<Vec<MetricPoint>> {
        self.series
            .get(name)
            .map(|s| s.points.iter().copied().collect())
            .ok_or_else(|| ObservabilityError::MetricNotFound(name.to_string()))
    }

    /// Sorted names of all series.
    pub fn metric_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.series.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Drop one series. Returns whether it existed.
    pub fn clear(&self, name: &str) -> bool {
        let removed = self.series.remove(name).is_some();
        if removed {
            debug!(metric = name, "metric series cleared");
        }
        removed
    }

    /// Drop every series.
    pub fn reset(&self) {
        let count = self.series.len();
        self.series.clear();
        info!(series = count, "metrics reset");
    }

    /// Record force and aggregation confidence of a force result.
    pub fn record_force(&self, result: &ForceResult) -> ObservabilityResult<()> {
        self.record_metric(FORCE, result.force)?;
        self.record_metric(FORCE_CONFIDENCE, result.confidence)
    }

    /// Record probability, confidence and whether a decision was made.
    pub fn record_decision(&self, result: &DecisionResult) -> ObservabilityResult<()> {
        self.record_metric(DECISION_PROBABILITY, result.probability)?;
        self.record_metric(DECISION_CONFIDENCE, result.confidence)?;
        let made = if result.decision.is_some() { 1.0 } else { 0.0 };
        self.record_metric(DECISION_MADE, made)
    }
}
