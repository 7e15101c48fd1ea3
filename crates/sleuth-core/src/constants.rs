//! Compiled defaults shared across Sleuth crates.

/// Length of the contiguous token run that counts as an exact copy.
pub const DEFAULT_EXACT_RUN_LENGTH: usize = 75;

/// Window length for short pattern matches.
pub const DEFAULT_PATTERN_LENGTH: usize = 15;

/// Pattern matches per pair at which counting saturates and the pair is flagged.
pub const DEFAULT_PATTERN_CAP: usize = 10;

/// Arrivals closer than this many seconds are flagged together.
pub const DEFAULT_PROXIMITY_SECS: i64 = 1;

/// Minimum pooled pattern matches and distinct regions for a patchwork flag.
pub const DEFAULT_PATCHWORK_THRESHOLD: usize = 20;

/// Name given to the intake worker thread.
pub const DEFAULT_WORKER_THREAD_NAME: &str = "sleuth-intake";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "sleuth.toml";

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "SLEUTH_LOG";
