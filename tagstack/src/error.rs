use crate::TPath;
use thiserror::Error;

/// Raised when [`Stack::pop`](crate::Stack::pop) or [`Stack::top`](crate::Stack::top)
/// is called on an empty stack. Seeing this outside of a test means the caller
/// skipped an emptiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("attempted to access the top of an empty stack")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The line ended while a tag name was still being read.
    #[error("unterminated tag starting at column {column}")]
    UnterminatedTag { column: usize },
}

/// Failures of the driver that happen before any validation starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File does not exist or has the wrong path: {0}")]
    DocumentNotFound(TPath),

    #[error("{kind} list not found at {path}")]
    VocabularyNotFound { kind: &'static str, path: TPath },
}
