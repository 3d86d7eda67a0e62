//! Error types shared across the shell, pages and runtime.

mod types;

pub use types::{FolioError, PageError, PageResult, Result};
