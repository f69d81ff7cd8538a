// Engine library root
// Allocation core plus the collaborators that feed it (store, validation) and
// read from it (reports).

pub mod allocator;
pub mod config;
pub mod data;
pub mod error;
pub mod report;

pub use allocator::{calculate, summarize};
pub use error::{EngineError, Result};
