//! The parser seam between raw bytes and tabular datasets.

use ags_model::{DatasetMetadata, TabularDataset};

use crate::error::ParseError;

/// Tables decoded from one file, in file order.
#[derive(Debug, Clone, Default)]
pub struct ParsedTables {
    pub datasets: Vec<TabularDataset>,
    pub metadata: DatasetMetadata,
}

impl ParsedTables {
    pub fn table_names(&self) -> Vec<&str> {
        self.datasets.iter().map(TabularDataset::name).collect()
    }
}

/// Decodes raw file bytes into named tables.
///
/// Implementations must either return every table of the file or an error;
/// the loader never sees a partial result.
pub trait TableParser: Send + Sync {
    /// Short format name used in logs.
    fn format_name(&self) -> &'static str;

    fn parse(&self, bytes: &[u8]) -> Result<ParsedTables, ParseError>;
}
