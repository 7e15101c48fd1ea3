//! Core types: identifiers, submissions, arrival times, collections.

pub mod arrival;
pub mod collections;
pub mod identifiers;
pub mod submission;

pub use arrival::Arrival;
pub use identifiers::{OwnerId, SubmissionId};
pub use submission::{OwnerRole, SourceText, Submission};
