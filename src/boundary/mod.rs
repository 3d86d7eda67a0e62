//! Error containment around page code.
//!
//! The boundary runs every page step through [`ErrorBoundary::guard`]. The
//! first failure, returned or panicked, is reported to a [`DiagnosticSink`]
//! and latches the boundary into `Failed`; from then on no page code runs and
//! the shell shows the fallback until the application is reloaded.

mod core;
mod sink;

pub use self::core::{BoundaryState, CapturedError, ErrorBoundary, ErrorInfo, GuardScope, Phase};
pub use sink::{DiagnosticSink, NullDiagnosticSink};
