//! Error types

mod config;
mod fetch;

pub use config::*;
pub use fetch::*;

/// Message shown to the user when a page fails to load.
pub const PAGE_LOAD_ERROR: &str = "Could not load records. Please try again later.";

/// Message shown to the user when a bulk selection fails.
pub const BULK_SELECT_ERROR: &str = "An error occurred while performing bulk selection.";
