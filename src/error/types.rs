use thiserror::Error;

use crate::logging::LoggingError;
use crate::router::{PageId, RouteError};
use crate::timer::TimerError;

/// Unified result type for the folio crate.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Result type returned by page hooks.
pub type PageResult<T> = std::result::Result<T, PageError>;

/// Errors surfaced by the shell and runtime.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("route table error: {0}")]
    Route(#[from] RouteError),
    #[error("timer error: {0}")]
    Timer(#[from] TimerError),
    #[error("zone `{0}` not found in registry")]
    ZoneNotFound(&'static str),
    #[error("page `{0}` is not registered")]
    PageNotRegistered(PageId),
    #[error("page error: {0}")]
    Page(#[from] PageError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures raised by a page while it renders or reacts to input.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("render failed: {0}")]
    Render(String),
    #[error("content error: {0}")]
    Content(String),
    #[error("timer error: {0}")]
    Timer(#[from] TimerError),
}
