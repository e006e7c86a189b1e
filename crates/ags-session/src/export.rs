//! CSV export of the active table.

use std::io::Write;
use std::sync::Arc;

use ags_model::TabularDataset;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportError;
use crate::selection::SelectionState;
use crate::store::DatasetStore;

/// MIME type of the exported stream.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// `<table>.csv`
pub fn export_file_name(table: &str) -> String {
    format!("{table}.csv")
}

/// Resolves the active table and prepares its CSV export.
///
/// Fails with [`ExportError::NoActiveSelection`] when nothing is selected or
/// the selected table is no longer in the store.
pub fn export(store: &DatasetStore, selection: &SelectionState) -> Result<CsvExport, ExportError> {
    let dataset = selection
        .get()
        .and_then(|name| store.get(name).ok())
        .ok_or(ExportError::NoActiveSelection)?;
    Ok(CsvExport::new(Arc::clone(dataset)))
}

/// A pending CSV download of one table.
///
/// Nothing is encoded until the chunks are pulled, so holding an export is
/// as cheap as holding the dataset handle.
#[derive(Debug, Clone)]
pub struct CsvExport {
    file_name: String,
    dataset: Arc<TabularDataset>,
}

impl CsvExport {
    pub fn new(dataset: Arc<TabularDataset>) -> Self {
        Self {
            file_name: export_file_name(dataset.name()),
            dataset,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        CSV_MIME_TYPE
    }

    pub fn table_name(&self) -> &str {
        self.dataset.name()
    }

    /// Encoded records: the header line first, then one chunk per row.
    pub fn chunks(&self) -> CsvChunks<'_> {
        CsvChunks {
            dataset: &self.dataset,
            next: 0,
        }
    }

    /// Streams every chunk into `writer`, returning the bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<u64, ExportError> {
        let mut written = 0u64;
        for chunk in self.chunks() {
            let chunk = chunk?;
            writer.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        writer.flush()?;
        tracing::debug!(
            table = self.dataset.name(),
            rows = self.dataset.row_count(),
            bytes = written,
            "exported table"
        );
        Ok(written)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Lazy iterator over the encoded records of a [`CsvExport`].
#[derive(Debug)]
pub struct CsvChunks<'a> {
    dataset: &'a TabularDataset,
    next: usize,
}

impl Iterator for CsvChunks<'_> {
    type Item = Result<Vec<u8>, ExportError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record: &[String] = match self.next {
            0 => self.dataset.columns(),
            index => self.dataset.row(index - 1)?,
        };
        self.next += 1;
        Some(encode_record(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.dataset.row_count() + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

fn encode_record(record: &[String]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(record)?;
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}
