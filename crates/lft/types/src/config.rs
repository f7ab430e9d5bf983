//! Pipeline configuration.
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! num_qubits = 5
//! force_threshold = 0.6
//! quantum_backend = "phase"
//!
//! [calibration]
//! learning_rate = 0.05
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LftError, LftResult};
use crate::state::MAX_QUBITS;

/// Encoding strategy selected by the `quantum_backend` tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantumBackend {
    /// Real, non-negative amplitudes interpolating the null state and the
    /// category regions.
    #[default]
    #[serde(alias = "simulator")]
    Angle,
    /// Same magnitudes as `Angle`, with a phase ramp proportional to force.
    Phase,
}

impl fmt::Display for QuantumBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Angle => write!(f, "angle"),
            Self::Phase => write!(f, "phase"),
        }
    }
}

impl FromStr for QuantumBackend {
    type Err = LftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "angle" | "simulator" => Ok(Self::Angle),
            "phase" => Ok(Self::Phase),
            other => Err(LftError::InvalidParameter(format!(
                "unknown quantum backend: {}",
                other
            ))),
        }
    }
}

/// Calibration step parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Step size applied per sample (0.0 exclusive to 1.0).
    pub learning_rate: f64,
    /// Floor for weights pushed down by calibration.
    pub min_weight: f64,
    /// Saturation bound for weights pushed up by calibration.
    pub max_weight: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            min_weight: 0.1,
            max_weight: 5.0,
        }
    }
}

/// Metric retention.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Points kept per series; `None` keeps everything.
    pub max_points_per_series: Option<usize>,
}

/// Configuration consumed by the processor and the decision engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LftConfig {
    /// State space is `2^num_qubits` amplitudes.
    pub num_qubits: u32,
    /// Force at or above which a result is flagged significant.
    pub force_threshold: f64,
    /// Verify normalization after every encoding.
    pub coherence_check: bool,
    /// Encoding strategy.
    pub quantum_backend: QuantumBackend,
    /// Minimum category mass for a decision to be reported.
    pub significance_floor: f64,
    pub calibration: CalibrationConfig,
    pub metrics: MetricsConfig,
}

impl Default for LftConfig {
    fn default() -> Self {
        Self {
            num_qubits: 4,
            force_threshold: 0.7,
            coherence_check: true,
            quantum_backend: QuantumBackend::Angle,
            significance_floor: 0.05,
            calibration: CalibrationConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl LftConfig {
    pub fn with_num_qubits(mut self, num_qubits: u32) -> Self {
        self.num_qubits = num_qubits;
        self
    }

    pub fn with_force_threshold(mut self, threshold: f64) -> Self {
        self.force_threshold = threshold;
        self
    }

    pub fn with_coherence_check(mut self, enabled: bool) -> Self {
        self.coherence_check = enabled;
        self
    }

    pub fn with_backend(mut self, backend: QuantumBackend) -> Self {
        self.quantum_backend = backend;
        self
    }

    pub fn with_significance_floor(mut self, floor: f64) -> Self {
        self.significance_floor = floor;
        self
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(contents: &str) -> LftResult<Self> {
        let config: LftConfig =
            toml::from_str(contents).map_err(|e| LftError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> LftResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Range-check every option.
    pub fn validate(&self) -> LftResult<()> {
        if self.num_qubits < 1 || self.num_qubits > MAX_QUBITS {
            return Err(LftError::InvalidParameter(format!(
                "num_qubits must be in 1..={}, got {}",
                MAX_QUBITS, self.num_qubits
            )));
        }
        check_unit("force_threshold", self.force_threshold)?;
        check_unit("significance_floor", self.significance_floor)?;

        let cal = &self.calibration;
        if !(cal.learning_rate > 0.0 && cal.learning_rate <= 1.0) {
            return Err(LftError::InvalidParameter(format!(
                "calibration.learning_rate must be in (0, 1], got {}",
                cal.learning_rate
            )));
        }
        if !cal.min_weight.is_finite() || cal.min_weight < 0.0 {
            return Err(LftError::InvalidParameter(format!(
                "calibration.min_weight must be finite and >= 0, got {}",
                cal.min_weight
            )));
        }
        if !cal.max_weight.is_finite() || cal.max_weight < cal.min_weight {
            return Err(LftError::InvalidParameter(format!(
                "calibration.max_weight must be finite and >= min_weight, got {}",
                cal.max_weight
            )));
        }
        if self.metrics.max_points_per_series == Some(0) {
            return Err(LftError::InvalidParameter(
                "metrics.max_points_per_series must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Reject values outside [0, 1] (NaN included).
pub fn check_unit(name: &str, value: f64) -> LftResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LftError::InvalidParameter(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )))
    }
}
