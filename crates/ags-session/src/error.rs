//! Error types for session state transitions.

use ags_ingest::LoadError;
use thiserror::Error;

/// Errors raised by [`DatasetStore`](crate::DatasetStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("table not found: {name}")]
    NotFound { name: String },
    #[error("table '{name}' appears more than once in the loaded file")]
    DuplicateName { name: String },
}

/// A selection that does not name a table in the current store.
///
/// Front-ends only offer names taken from the store, so seeing this error
/// means the caller passed a stale or invented name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("invalid selection '{name}': available tables are [{}]", .available.join(", "))]
    InvalidSelection {
        name: String,
        available: Vec<String>,
    },
}

/// Errors raised while exporting the active table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no active table to export")]
    NoActiveSelection,
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by [`Session`](crate::Session) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("a file is still loading; wait for it to finish before uploading another")]
    LoadInProgress,
}

impl SessionError {
    /// True for failures of the load pipeline (as opposed to caller misuse).
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_selection_lists_available_tables() {
        let err = SelectionError::InvalidSelection {
            name: "GEOL".to_string(),
            available: vec!["PROJ".to_string(), "LOCA".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid selection 'GEOL': available tables are [PROJ, LOCA]"
        );
    }

    #[test]
    fn load_errors_are_load_failures() {
        let err: SessionError = LoadError::UnsupportedExtension {
            file_name: "a.txt".to_string(),
        }
        .into();
        assert!(err.is_load_failure());
        assert!(!SessionError::LoadInProgress.is_load_failure());
    }
}
