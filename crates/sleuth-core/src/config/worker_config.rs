//! Intake worker configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WORKER_THREAD_NAME;

/// Configuration for the background intake worker.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkerConfig {
    /// OS thread name for the worker. Default: "sleuth-intake".
    pub thread_name: Option<String>,
}

impl WorkerConfig {
    pub fn effective_thread_name(&self) -> String {
        self.thread_name
            .clone()
            .unwrap_or_else(|| DEFAULT_WORKER_THREAD_NAME.to_string())
    }
}
