use std::any::Any;
use std::fmt::Display;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crossterm::style::Stylize;

use crate::pages::PageView;
use crate::router::PageId;

use super::DiagnosticSink;

/// Which page step was running when the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Mount,
    Render,
    Input,
    Timer,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Mount => "mount",
            Phase::Render => "render",
            Phase::Input => "input",
            Phase::Timer => "timer",
        }
    }
}

/// Where a guarded step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardScope {
    pub page: Option<PageId>,
    pub path: String,
    pub phase: Phase,
}

impl GuardScope {
    pub fn new(page: Option<PageId>, path: impl Into<String>, phase: Phase) -> Self {
        Self {
            page,
            path: path.into(),
            phase,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    pub message: String,
    pub page: Option<PageId>,
    pub path: String,
    pub phase: Phase,
    pub panicked: bool,
}

/// Contextual trace reported alongside a captured error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub component_stack: Vec<String>,
}

impl ErrorInfo {
    fn for_scope(scope: &GuardScope) -> Self {
        let leaf = match scope.page {
            Some(page) => format!("Page({page}) {}", scope.phase.as_str()),
            None => format!("Page(?) {}", scope.phase.as_str()),
        };
        Self {
            component_stack: vec![
                "FolioApp".to_string(),
                "ErrorBoundary".to_string(),
                format!("Router({})", scope.path),
                leaf,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState {
    Healthy,
    Failed(CapturedError),
}

pub struct ErrorBoundary {
    state: BoundaryState,
    sink: Arc<dyn DiagnosticSink>,
    fallback: Option<PageView>,
}

impl ErrorBoundary {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            state: BoundaryState::Healthy,
            sink,
            fallback: None,
        }
    }

    /// Replace the default fallback view.
    pub fn with_fallback(mut self, view: PageView) -> Self {
        self.fallback = Some(view);
        self
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, BoundaryState::Failed(_))
    }

    pub fn error(&self) -> Option<&CapturedError> {
        match &self.state {
            BoundaryState::Failed(error) => Some(error),
            BoundaryState::Healthy => None,
        }
    }

    /// Run `step`, converting an `Err` or a panic into the `Failed` state.
    ///
    /// Returns `None` when the step failed or the boundary had already failed,
    /// in which case `step` is not run at all.
    pub fn guard<T, E, F>(&mut self, scope: GuardScope, step: F) -> Option<T>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        if self.is_failed() {
            return None;
        }

        match catch_unwind(AssertUnwindSafe(step)) {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                self.capture(scope, err.to_string(), false);
                None
            }
            Err(payload) => {
                self.capture(scope, panic_message(payload.as_ref()), true);
                None
            }
        }
    }

    fn capture(&mut self, scope: GuardScope, message: String, panicked: bool) {
        let info = ErrorInfo::for_scope(&scope);
        let error = CapturedError {
            message,
            page: scope.page,
            path: scope.path,
            phase: scope.phase,
            panicked,
        };
        self.sink.report(&error, &info);
        self.state = BoundaryState::Failed(error);
    }

    pub fn fallback_view(&self) -> PageView {
        if let Some(view) = &self.fallback {
            return view.clone();
        }
        let mut view = PageView::new();
        view.line("Something went wrong".bold().red().to_string())
            .blank()
            .line("An unexpected error occurred. Please try again later.")
            .blank()
            .line(format!("{} Refresh Page", "[r]".yellow()));
        view
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "page panicked".to_string()
    }
}
