//! Data model shared by the AGS explorer crates.
//!
//! A loaded file becomes an ordered set of [`TabularDataset`]s, one per group,
//! together with the [`DatasetMetadata`] the parser extracted and the
//! [`SourceInfo`] of the file itself.

pub mod dataset;
pub mod error;
pub mod metadata;

pub use dataset::TabularDataset;
pub use error::{DatasetError, Result};
pub use metadata::{DatasetMetadata, GroupMetadata, SourceInfo};
