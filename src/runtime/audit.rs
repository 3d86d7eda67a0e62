//! Lifecycle audit hooks.
//!
//! Records carry a stage plus structured details so callers can buffer or
//! assert on the shell's progression without reading logs.

use std::sync::Mutex;
use std::time::SystemTime;

use serde_json::Value;

/// Lifecycle checkpoints emitted by the runtime and the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeAuditStage {
    /// The loading placeholder is up and the bootstrap timer armed.
    BootstrapStarted,
    /// Loading finished and the shell mounted its first page.
    ShellMounted,
    /// The shell moved to a new location.
    Navigated,
    /// The body scroll offset went back to the origin.
    ScrollReset,
    /// A timer fired and was delivered.
    TimerFired,
    /// The error boundary caught a page failure.
    RenderFailed,
    /// The application instance was replaced by a fresh one.
    Reloaded,
    /// Rendering flushed dirty zones.
    RenderCommitted,
    /// Render attempt skipped because nothing was dirty.
    RenderSkipped,
    /// Runtime stopped.
    RuntimeStopped,
}

/// Structured audit entry.
#[derive(Debug, Clone)]
pub struct RuntimeAuditEvent {
    pub timestamp: SystemTime,
    pub stage: RuntimeAuditStage,
    pub details: Vec<(String, Value)>,
}

impl RuntimeAuditEvent {
    fn new(stage: RuntimeAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// Builder helper to append fields ergonomically.
pub struct RuntimeAuditEventBuilder {
    event: RuntimeAuditEvent,
}

impl RuntimeAuditEventBuilder {
    pub fn new(stage: RuntimeAuditStage) -> Self {
        Self {
            event: RuntimeAuditEvent::new(stage),
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event.details.push((key.into(), value.into()));
        self
    }

    pub fn finish(self) -> RuntimeAuditEvent {
        self.event
    }
}

/// Trait implemented by any audit sink.
pub trait RuntimeAudit: Send + Sync {
    fn record(&self, event: RuntimeAuditEvent);
}

/// Default no-op implementation used when auditing is disabled.
#[derive(Debug, Default)]
pub struct NullRuntimeAudit;

impl RuntimeAudit for NullRuntimeAudit {
    fn record(&self, _event: RuntimeAuditEvent) {}
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingAudit {
    events: Mutex<Vec<RuntimeAuditEvent>>,
}

impl RecordingAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RuntimeAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<RuntimeAuditStage> {
        self.events().into_iter().map(|event| event.stage).collect()
    }

    pub fn count(&self, stage: RuntimeAuditStage) -> usize {
        self.events()
            .iter()
            .filter(|event| event.stage == stage)
            .count()
    }
}

impl RuntimeAudit for RecordingAudit {
    fn record(&self, event: RuntimeAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recording_audit_keeps_order_and_details() {
        let audit = RecordingAudit::new();
        audit.record(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::Navigated)
                .detail("to", "/skills")
                .finish(),
        );
        audit.record(RuntimeAuditEventBuilder::new(RuntimeAuditStage::ScrollReset).finish());

        assert_eq!(
            audit.stages(),
            vec![RuntimeAuditStage::Navigated, RuntimeAuditStage::ScrollReset]
        );
        assert_eq!(audit.events()[0].detail("to"), Some(&json!("/skills")));
        assert_eq!(audit.count(RuntimeAuditStage::ScrollReset), 1);
    }
}
