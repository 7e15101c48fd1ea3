//! Token sequence matchers: exact long runs and capped short patterns.
//!
//! Both are pure functions over `existing` (a stored submission) and
//! `incoming` (the submission being processed). Offsets reported by the
//! pattern matcher always index into `incoming`.

pub mod exact;
pub mod pattern;

pub use exact::has_exact_run;
pub use pattern::count_pattern_matches;
