//! Core bookmark tree type, error taxonomy, and file helpers.

mod error;
mod fs;
mod types;

pub use error::*;
pub use fs::write_atomic;
pub use types::*;
