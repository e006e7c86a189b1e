//! Error types for AGS data ingestion.

use std::path::PathBuf;

use ags_model::DatasetError;
use thiserror::Error;

/// Errors produced by a [`TableParser`](crate::TableParser).
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input bytes are not valid UTF-8.
    #[error("file is not valid UTF-8 (invalid byte at offset {offset})")]
    Encoding { offset: usize },

    /// The record tokenizer rejected a line.
    #[error("line {line}: {message}")]
    Record { line: u64, message: String },

    /// First field of a line is not a known descriptor.
    #[error("line {line}: unknown descriptor '{descriptor}'")]
    UnknownDescriptor { line: u64, descriptor: String },

    /// A GROUP line without a group name.
    #[error("line {line}: GROUP line has no group name")]
    MissingGroupName { line: u64 },

    /// The same group name appears twice.
    #[error("line {line}: group '{group}' is defined more than once")]
    DuplicateGroup { line: u64, group: String },

    /// A row appears before any GROUP line.
    #[error("line {line}: {descriptor} line appears before any GROUP")]
    RowOutsideGroup { line: u64, descriptor: String },

    /// A row appears before the group's HEADING line.
    #[error("line {line}: {descriptor} line in group '{group}' appears before HEADING")]
    RowBeforeHeading {
        line: u64,
        group: String,
        descriptor: String,
    },

    /// A second HEADING line inside one group.
    #[error("line {line}: group '{group}' has more than one HEADING line")]
    DuplicateHeadingRow { line: u64, group: String },

    /// A group ended without ever declaring its headings.
    #[error("line {line}: group '{group}' has no HEADING line")]
    MissingHeading { line: u64, group: String },

    /// A row's field count differs from the heading count.
    #[error("line {line}: group '{group}' expects {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        group: String,
        expected: usize,
        found: usize,
    },

    /// The parsed table violated a dataset invariant.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Free-form failure reported by a third-party parser.
    #[error("{0}")]
    Message(String),
}

/// Errors that can occur while loading an uploaded file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File name does not carry the accepted extension.
    #[error("unsupported file type: {file_name} (expected a .ags file)")]
    UnsupportedExtension { file_name: String },

    /// File exceeds the configured size limit.
    #[error("file too large: {file_name} is {size} bytes (limit {max_size})")]
    FileTooLarge {
        file_name: String,
        size: u64,
        max_size: u64,
    },

    /// Failed to read the file from disk.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File uses an encoding that is not supported.
    #[error("unsupported encoding in {file_name}: {encoding}")]
    UnsupportedEncoding {
        file_name: String,
        encoding: &'static str,
    },

    /// A background load ended without reporting a result.
    #[error("loading {file_name} was interrupted before it completed")]
    Interrupted { file_name: String },

    /// The parser rejected the content.
    #[error("failed to parse {file_name}: {source}")]
    Parse {
        file_name: String,
        #[source]
        source: ParseError,
    },
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::UnsupportedExtension {
            file_name: "site.csv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file type: site.csv (expected a .ags file)"
        );
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = ParseError::FieldCount {
            line: 7,
            group: "LOCA".to_string(),
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "line 7: group 'LOCA' expects 3 fields, found 2"
        );
    }

    #[test]
    fn test_error_from_dataset() {
        let parse: ParseError = DatasetError::EmptyName.into();
        assert!(matches!(parse, ParseError::Dataset(DatasetError::EmptyName)));
    }
}
