//! Relative arrival times.

use serde::{Deserialize, Serialize};

/// When a submission arrived, relative to engine start.
///
/// Seed submissions handed to the engine at construction have no real
/// arrival time. They are never cross-flagged, so the distinction is kept
/// as its own state rather than folded into a zero timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "secs")]
pub enum Arrival {
    Seeded,
    At(i64),
}

impl Arrival {
    pub fn is_seeded(self) -> bool {
        matches!(self, Self::Seeded)
    }

    /// Seconds since engine start, `None` for seeds.
    pub fn secs(self) -> Option<i64> {
        match self {
            Self::Seeded => None,
            Self::At(secs) => Some(secs),
        }
    }

    /// True when both arrivals are real and strictly less than
    /// `threshold_secs` apart.
    pub fn within(self, other: Arrival, threshold_secs: i64) -> bool {
        match (self.secs(), other.secs()) {
            (Some(a), Some(b)) => a.abs_diff(b) < threshold_secs.max(0) as u64,
            _ => false,
        }
    }
}
