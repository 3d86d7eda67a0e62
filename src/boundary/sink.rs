use serde_json::json;

use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};

use super::{CapturedError, ErrorInfo};

/// Operator-visible channel receiving caught failures. Delivery is best
/// effort; the boundary never looks at the outcome.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, error: &CapturedError, info: &ErrorInfo);
}

/// Sink used when diagnostics are disabled.
#[derive(Debug, Default)]
pub struct NullDiagnosticSink;

impl DiagnosticSink for NullDiagnosticSink {
    fn report(&self, _error: &CapturedError, _info: &ErrorInfo) {}
}

impl DiagnosticSink for Logger {
    fn report(&self, error: &CapturedError, info: &ErrorInfo) {
        let event = event_with_fields(
            LogLevel::Error,
            "folio::boundary",
            "render_failure_caught",
            [
                json_kv("error", json!(error.message)),
                json_kv("page", json!(error.page.map(|page| page.as_str()))),
                json_kv("path", json!(error.path)),
                json_kv("phase", json!(error.phase.as_str())),
                json_kv("panicked", json!(error.panicked)),
                json_kv("component_stack", json!(info.component_stack)),
            ],
        );
        let _ = self.log_event(event);
    }
}
