//! Error handling for Sleuth.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod panic;
pub mod tokenize_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::ErrorCode;
pub use panic::panic_message;
pub use tokenize_error::TokenizeError;
