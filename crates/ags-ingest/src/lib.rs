//! AGS data ingestion.
//!
//! This crate turns the bytes of an uploaded file into the ordered set of
//! [`TabularDataset`](ags_model::TabularDataset)s that a session works with.
//!
//! # Features
//!
//! - **Parser seam**: [`TableParser`] decodes bytes into named tables
//! - **AGS4**: [`Ags4Parser`] reads AGS4 group/heading/data records
//! - **Loading**: [`Loader`] applies extension, size and encoding checks and
//!   reports either a full result or one [`LoadError`]
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ags_ingest::{LoadOptions, Loader};
//!
//! let loader = Loader::ags4(LoadOptions::default());
//! let loaded = loader.load_path(Path::new("site.ags"))?;
//! for dataset in &loaded.datasets {
//!     println!("{}: {} rows", dataset.name(), dataset.row_count());
//! }
//! ```

mod ags4;
mod error;
mod loader;
mod parser;

// === Error Types ===
pub use error::{LoadError, ParseError, Result};

// === Parsing ===
pub use ags4::{Ags4Parser, DESCRIPTOR_COLUMN};
pub use parser::{ParsedTables, TableParser};

// === Loading ===
pub use loader::{
    AGS_EXTENSION, LoadOptions, LoadedFile, Loader, MAX_FILE_SIZE, has_ags_extension,
};
