//! Configuration system for Sleuth.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod detection_config;
pub mod sleuth_config;
pub mod worker_config;

pub use detection_config::{DetectionConfig, DetectionThresholds};
pub use sleuth_config::{ConfigOverrides, SleuthConfig};
pub use worker_config::WorkerConfig;
