//! Session state for one uploaded AGS file.
//!
//! - [`DatasetStore`]: the tables of the loaded file, replaced as a whole
//! - [`SelectionState`]: the active table, always a key of the store
//! - [`ViewProjection`]: counts, labels and grid derived from both
//! - [`CsvExport`]: lazy CSV encoding of the active table
//! - [`Session`]: applies upload and selection events and notifies observers

mod background;
mod error;
mod export;
mod projection;
mod selection;
mod session;
mod store;

pub use background::{LoadResult, PendingLoad};
pub use error::{ExportError, SelectionError, SessionError, StoreError};
pub use export::{CSV_MIME_TYPE, CsvChunks, CsvExport, export, export_file_name};
pub use projection::{
    DEFAULT_GRID_ROWS, GridOptions, GridView, ViewProjection, ViewState, format_count,
};
pub use selection::SelectionState;
pub use session::{LoadFailurePolicy, Session, SessionConfig, SessionSnapshot, SubscriptionId};
pub use store::DatasetStore;
