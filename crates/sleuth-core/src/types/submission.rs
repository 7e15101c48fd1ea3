//! Submissions and their source handles.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::identifiers::{OwnerId, SubmissionId};

/// Cheaply cloneable handle to a submission's source text.
///
/// The engine never inspects the text; it only hands it to the tokenizer.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceText(Arc<str>);

impl SourceText {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceText({} bytes)", self.0.len())
    }
}

/// Which owner of a submission a flag is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerRole {
    Student,
    Professor,
}

impl OwnerRole {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Professor => "professor",
        }
    }
}

/// One unit of code to be checked.
///
/// Immutable once built. Owners are optional: seed submissions usually have
/// neither, and flagging an absent role is a no-op.
#[derive(Debug, Clone)]
pub struct Submission {
    id: SubmissionId,
    source: SourceText,
    student: Option<OwnerId>,
    professor: Option<OwnerId>,
}

impl Submission {
    pub fn new(id: SubmissionId, source: impl Into<SourceText>) -> Self {
        Self {
            id,
            source: source.into(),
            student: None,
            professor: None,
        }
    }

    pub fn with_student(mut self, student: impl Into<OwnerId>) -> Self {
        self.student = Some(student.into());
        self
    }

    pub fn with_professor(mut self, professor: impl Into<OwnerId>) -> Self {
        self.professor = Some(professor.into());
        self
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn student(&self) -> Option<&OwnerId> {
        self.student.as_ref()
    }

    pub fn professor(&self) -> Option<&OwnerId> {
        self.professor.as_ref()
    }

    /// The owner for `role`, if present.
    pub fn owner(&self, role: OwnerRole) -> Option<&OwnerId> {
        match role {
            OwnerRole::Student => self.student(),
            OwnerRole::Professor => self.professor(),
        }
    }

    pub fn has_owner(&self) -> bool {
        self.student.is_some() || self.professor.is_some()
    }
}
