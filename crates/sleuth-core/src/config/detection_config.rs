//! Detection thresholds.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXACT_RUN_LENGTH, DEFAULT_PATCHWORK_THRESHOLD, DEFAULT_PATTERN_CAP,
    DEFAULT_PATTERN_LENGTH, DEFAULT_PROXIMITY_SECS,
};
use crate::errors::ConfigError;

/// Configuration for the match engine and flag policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Token run length treated as an exact copy. Default: 75.
    pub exact_run_length: Option<usize>,
    /// Window length for short pattern matches. Default: 15.
    pub pattern_length: Option<usize>,
    /// Pattern matches per pair that flag the pair. Default: 10.
    pub pattern_cap: Option<usize>,
    /// Arrivals closer than this (seconds) are flagged together. Default: 1.
    pub proximity_secs: Option<i64>,
    /// Pooled matches and distinct regions for a patchwork flag. Default: 20.
    pub patchwork_threshold: Option<usize>,
}

impl DetectionConfig {
    pub fn effective_exact_run_length(&self) -> usize {
        self.exact_run_length.unwrap_or(DEFAULT_EXACT_RUN_LENGTH)
    }

    pub fn effective_pattern_length(&self) -> usize {
        self.pattern_length.unwrap_or(DEFAULT_PATTERN_LENGTH)
    }

    pub fn effective_pattern_cap(&self) -> usize {
        self.pattern_cap.unwrap_or(DEFAULT_PATTERN_CAP)
    }

    pub fn effective_proximity_secs(&self) -> i64 {
        self.proximity_secs.unwrap_or(DEFAULT_PROXIMITY_SECS)
    }

    pub fn effective_patchwork_threshold(&self) -> usize {
        self.patchwork_threshold.unwrap_or(DEFAULT_PATCHWORK_THRESHOLD)
    }

    /// Resolve every threshold to a concrete value.
    pub fn thresholds(&self) -> DetectionThresholds {
        DetectionThresholds {
            exact_run_length: self.effective_exact_run_length(),
            pattern_length: self.effective_pattern_length(),
            pattern_cap: self.effective_pattern_cap(),
            proximity_secs: self.effective_proximity_secs(),
            patchwork_threshold: self.effective_patchwork_threshold(),
        }
    }
}

/// Resolved thresholds the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionThresholds {
    pub exact_run_length: usize,
    pub pattern_length: usize,
    pub pattern_cap: usize,
    pub proximity_secs: i64,
    pub patchwork_threshold: usize,
}

impl DetectionThresholds {
    /// Reject thresholds the match engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("exact_run_length", self.exact_run_length),
            ("pattern_length", self.pattern_length),
            ("pattern_cap", self.pattern_cap),
            ("patchwork_threshold", self.patchwork_threshold),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("detection.{field}"),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if self.proximity_secs < 0 {
            return Err(ConfigError::ValidationFailed {
                field: "detection.proximity_secs".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        DetectionConfig::default().thresholds()
    }
}
