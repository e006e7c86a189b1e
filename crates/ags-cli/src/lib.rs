//! CLI library components for the AGS4 explorer.

pub mod explore;
pub mod logging;
pub mod render;
