//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the Sleuth tracing/logging system.
///
/// Reads `SLEUTH_LOG` for filter directives, e.g.
/// `SLEUTH_LOG=sleuth_engine::intake=debug,sleuth_engine=info`.
/// Falls back to `sleuth=info` if unset or invalid.
///
/// Idempotent. Does nothing if a global subscriber was already installed
/// by the embedding application.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("sleuth=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
