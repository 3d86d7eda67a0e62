//! Terminal rendition of the WR Web Design portfolio.
//!
//! The crate is split the same way the site is: a shell (bootstrap, header
//! and footer, router, error boundary, scroll reset) around four pages fed
//! from hardcoded content. The runtime drives it from crossterm events and
//! repaints only the zones whose content changed.

pub mod boundary;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod nav;
pub mod pages;
pub mod registry;
pub mod render;
pub mod router;
pub mod runtime;
pub mod scroll;
pub mod shell;
pub mod timer;
pub mod width;

pub use boundary::{CapturedError, DiagnosticSink, ErrorBoundary, ErrorInfo, Phase};
pub use catalog::{FilterCategory, ProjectFilter, filter_projects};
pub use contact::{ContactForm, FieldErrors, validate};
pub use error::{FolioError, PageError, PageResult, Result};
pub use geometry::{Rect, Size};
pub use logging::{FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult, MemorySink};
pub use metrics::{MetricSnapshot, RuntimeMetrics};
pub use nav::{NAV_LINKS, NavLink, NavigationState};
pub use pages::{Page, PageContext, PageLifecycleEvent, PageManager, PageRequest, PageView};
pub use registry::ZoneRegistry;
pub use render::{AnsiRenderer, RendererSettings};
pub use router::{PageId, Route, RouteError, RoutePattern, RouteTable, location_from_hash};
pub use runtime::audit::{
    NullRuntimeAudit, RecordingAudit, RuntimeAudit, RuntimeAuditEvent, RuntimeAuditEventBuilder,
    RuntimeAuditStage,
};
pub use runtime::driver::cli::{CliDriver, CliDriverError, DriverResult};
pub use runtime::{EventFlow, FolioRuntime, RuntimeConfig, RuntimeEvent};
pub use scroll::{ScrollController, ScrollOffset};
pub use shell::{FolioApp, Frame, Instruments, PortfolioShell, ShellConfig};
pub use timer::{TimerError, TimerOwner, TimerQueue};
pub use width::display_width;
