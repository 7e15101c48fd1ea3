//! ErrorCode trait for structured failure reporting.

/// Every error enum exposes a stable code string. Codes travel as a
/// structured field on failure logs and on `PassFailedEvent`.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "TOKENIZE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const TOKENIZE_ERROR: &str = "TOKENIZE_ERROR";
pub const WORKER_SPAWN_FAILED: &str = "WORKER_SPAWN_FAILED";
pub const WORKER_GONE: &str = "WORKER_GONE";
pub const WORKER_PANICKED: &str = "WORKER_PANICKED";
