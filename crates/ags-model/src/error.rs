use thiserror::Error;

/// Errors raised while constructing a [`TabularDataset`](crate::TabularDataset).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("dataset name must not be empty")]
    EmptyName,
    #[error("dataset {dataset}: column {index} has an empty name")]
    EmptyColumnName { dataset: String, index: usize },
    #[error("dataset {dataset}: duplicate column '{column}'")]
    DuplicateColumn { dataset: String, column: String },
    #[error("dataset {dataset}: row {row} has {found} cells, expected {expected}")]
    RowLength {
        dataset: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
