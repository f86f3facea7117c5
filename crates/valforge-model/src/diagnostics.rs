//! Compile-time diagnostics.
//!
//! The type checker never stops at the first problem: every diagnostic is
//! collected into [`CompilerErrors`] in discovery order and the pipeline
//! halts afterwards if the collection is non-empty.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a compile-time diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Rule does not support the field type.
    Incompatible,
    /// Rule or referenced field does not exist.
    Missing,
    /// Rule parameter is malformed.
    Invalid,
    /// Name already registered.
    Duplicate,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incompatible => "incompatible",
            Self::Missing => "missing",
            Self::Invalid => "invalid",
            Self::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single diagnostic tied to a record, field and rule.
///
/// Location fields are empty when they do not apply (for example a
/// registration conflict has no record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerError {
    pub kind: ErrorKind,
    pub message: String,
    pub field: String,
    pub record: String,
    pub rule: String,
}

impl CompilerError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: String::new(),
            record: String::new(),
            rule: String::new(),
        }
    }

    pub fn at(mut self, record: &str, field: &str, rule: &str) -> Self {
        self.record = record.to_string();
        self.field = field.to_string();
        self.rule = rule.to_string();
        self
    }

    /// `Record.Field` when both are known.
    pub fn location(&self) -> Option<String> {
        match (self.record.is_empty(), self.field.is_empty()) {
            (false, false) => Some(format!("{}.{}", self.record, self.field)),
            (false, true) => Some(self.record.clone()),
            (true, false) => Some(self.field.clone()),
            (true, true) => None,
        }
    }
}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CompilerError {}

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompilerErrors(Vec<CompilerError>);

impl CompilerErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: CompilerError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, other: CompilerErrors) {
        self.0.extend(other.0);
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompilerError> {
        self.0.iter()
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.0.iter().filter(|error| error.kind == kind).count()
    }
}

impl fmt::Display for CompilerErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("no errors"),
            [only] => f.write_str(&only.message),
            [first, ..] => write!(f, "{} (and more)", first.message),
        }
    }
}

impl std::error::Error for CompilerErrors {}

impl<'a> IntoIterator for &'a CompilerErrors {
    type Item = &'a CompilerError;
    type IntoIter = std::slice::Iter<'a, CompilerError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for CompilerErrors {
    type Item = CompilerError;
    type IntoIter = std::vec::IntoIter<CompilerError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<CompilerError>> for CompilerErrors {
    fn from(errors: Vec<CompilerError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<CompilerError> for CompilerErrors {
    fn from_iter<I: IntoIterator<Item = CompilerError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
