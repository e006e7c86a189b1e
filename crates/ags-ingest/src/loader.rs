//! Turns an uploaded file into a complete set of datasets.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ags_model::{DatasetMetadata, SourceInfo, TabularDataset};

use crate::ags4::Ags4Parser;
use crate::error::{LoadError, Result};
use crate::parser::TableParser;

/// Maximum accepted upload size (500 MB default).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Extension accepted when [`LoadOptions::require_ags_extension`] is set.
pub const AGS_EXTENSION: &str = "ags";

/// Checks applied before the parser sees any bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub max_file_size: u64,
    pub require_ags_extension: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            require_ags_extension: true,
        }
    }
}

/// A successfully loaded file.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub datasets: Vec<TabularDataset>,
    pub metadata: DatasetMetadata,
    pub source: SourceInfo,
}

impl LoadedFile {
    pub fn table_count(&self) -> usize {
        self.datasets.len()
    }
}

/// Adapts raw bytes to datasets through a [`TableParser`].
///
/// A load either returns every table of the file or a single [`LoadError`];
/// there is no retry and no partial result.
#[derive(Clone)]
pub struct Loader {
    parser: Arc<dyn TableParser>,
    options: LoadOptions,
}

impl Loader {
    pub fn new(parser: Arc<dyn TableParser>, options: LoadOptions) -> Self {
        Self { parser, options }
    }

    /// Loader backed by the AGS4 parser.
    pub fn ags4(options: LoadOptions) -> Self {
        Self::new(Arc::new(Ags4Parser::new()), options)
    }

    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// Loads an uploaded byte buffer.
    pub fn load_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<LoadedFile> {
        let span = tracing::info_span!(
            "load",
            file = %file_name,
            format = self.parser.format_name()
        );
        let _guard = span.enter();

        self.check_extension(file_name)?;
        self.check_size(file_name, bytes.len() as u64)?;
        validate_encoding(file_name, bytes)?;

        let parsed = self
            .parser
            .parse(bytes)
            .map_err(|source| LoadError::Parse {
                file_name: file_name.to_string(),
                source,
            })?;

        tracing::info!(tables = parsed.datasets.len(), "loaded file");
        Ok(LoadedFile {
            datasets: parsed.datasets,
            metadata: parsed.metadata,
            source: SourceInfo::new(file_name, bytes.len() as u64),
        })
    }

    /// Reads a file from disk and loads it.
    ///
    /// The size limit is checked against file metadata before reading.
    pub fn load_path(&self, path: &Path) -> Result<LoadedFile> {
        let file_name = display_name(path);
        self.check_extension(&file_name)?;
        let metadata = std::fs::metadata(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.check_size(&file_name, metadata.len())?;
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bytes(&file_name, &bytes)
    }

    fn check_extension(&self, file_name: &str) -> Result<()> {
        if !self.options.require_ags_extension || has_ags_extension(file_name) {
            return Ok(());
        }
        Err(LoadError::UnsupportedExtension {
            file_name: file_name.to_string(),
        })
    }

    fn check_size(&self, file_name: &str, size: u64) -> Result<()> {
        if size > self.options.max_file_size {
            return Err(LoadError::FileTooLarge {
                file_name: file_name.to_string(),
                size,
                max_size: self.options.max_file_size,
            });
        }
        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::ags4(LoadOptions::default())
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("format", &self.parser.format_name())
            .field("options", &self.options)
            .finish()
    }
}

/// Returns true when the file name ends in `.ags`, ignoring case.
pub fn has_ags_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(AGS_EXTENSION))
}

/// Rejects byte-order marks of encodings we cannot decode.
fn validate_encoding(file_name: &str, bytes: &[u8]) -> Result<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => "UTF-16 LE",
        [0xFE, 0xFF, ..] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(LoadError::UnsupportedEncoding {
        file_name: file_name.to_string(),
        encoding,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
