//! Top-level Sleuth configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DetectionConfig, WorkerConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SLEUTH_*`)
/// 3. Project config (`sleuth.toml` in the project root)
/// 4. User config (`~/.sleuth/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SleuthConfig {
    pub detection: DetectionConfig,
    pub worker: WorkerConfig,
}

/// Caller-supplied values that beat every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub exact_run_length: Option<usize>,
    pub pattern_length: Option<usize>,
    pub pattern_cap: Option<usize>,
    pub proximity_secs: Option<i64>,
    pub patchwork_threshold: Option<usize>,
}

impl SleuthConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse failure is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &SleuthConfig) -> Result<(), ConfigError> {
        config.detection.thresholds().validate()?;
        if let Some(ref name) = config.worker.thread_name {
            if name.trim().is_empty() || name.contains('\0') {
                return Err(ConfigError::ValidationFailed {
                    field: "worker.thread_name".to_string(),
                    message: "must be a non-empty name without NUL bytes".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.sleuth/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".sleuth").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut SleuthConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SleuthConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut SleuthConfig, other: &SleuthConfig) {
        let (b, o) = (&mut base.detection, &other.detection);
        if o.exact_run_length.is_some() {
            b.exact_run_length = o.exact_run_length;
        }
        if o.pattern_length.is_some() {
            b.pattern_length = o.pattern_length;
        }
        if o.pattern_cap.is_some() {
            b.pattern_cap = o.pattern_cap;
        }
        if o.proximity_secs.is_some() {
            b.proximity_secs = o.proximity_secs;
        }
        if o.patchwork_threshold.is_some() {
            b.patchwork_threshold = o.patchwork_threshold;
        }

        if other.worker.thread_name.is_some() {
            base.worker.thread_name = other.worker.thread_name.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SLEUTH_DETECTION_EXACT_RUN_LENGTH`, `SLEUTH_WORKER_THREAD_NAME`, etc.
    /// Unparseable values are skipped.
    fn apply_env_overrides(config: &mut SleuthConfig) {
        let detection = &mut config.detection;
        if let Some(v) = env_parse::<usize>("SLEUTH_DETECTION_EXACT_RUN_LENGTH") {
            detection.exact_run_length = Some(v);
        }
        if let Some(v) = env_parse::<usize>("SLEUTH_DETECTION_PATTERN_LENGTH") {
            detection.pattern_length = Some(v);
        }
        if let Some(v) = env_parse::<usize>("SLEUTH_DETECTION_PATTERN_CAP") {
            detection.pattern_cap = Some(v);
        }
        if let Some(v) = env_parse::<i64>("SLEUTH_DETECTION_PROXIMITY_SECS") {
            detection.proximity_secs = Some(v);
        }
        if let Some(v) = env_parse::<usize>("SLEUTH_DETECTION_PATCHWORK_THRESHOLD") {
            detection.patchwork_threshold = Some(v);
        }
        if let Ok(val) = std::env::var("SLEUTH_WORKER_THREAD_NAME") {
            config.worker.thread_name = Some(val);
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut SleuthConfig, overrides: &ConfigOverrides) {
        let detection = &mut config.detection;
        if let Some(v) = overrides.exact_run_length {
            detection.exact_run_length = Some(v);
        }
        if let Some(v) = overrides.pattern_length {
            detection.pattern_length = Some(v);
        }
        if let Some(v) = overrides.pattern_cap {
            detection.pattern_cap = Some(v);
        }
        if let Some(v) = overrides.proximity_secs {
            detection.proximity_secs = Some(v);
        }
        if let Some(v) = overrides.patchwork_threshold {
            detection.patchwork_threshold = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
