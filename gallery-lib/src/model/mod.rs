//! Typed models

mod page;
mod record;

pub use page::*;
pub use record::*;
