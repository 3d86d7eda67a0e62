use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RuntimeMetrics {
    events: u64,
    renders: u64,
    dirty_zones: u64,
    navigations: u64,
    render_failures: u64,
    timers_fired: u64,
}

impl RuntimeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_render(&mut self, dirty_count: usize) {
        self.renders = self.renders.saturating_add(1);
        self.dirty_zones = self.dirty_zones.saturating_add(dirty_count as u64);
    }

    pub fn record_navigation(&mut self) {
        self.navigations = self.navigations.saturating_add(1);
    }

    pub fn record_render_failure(&mut self) {
        self.render_failures = self.render_failures.saturating_add(1);
    }

    pub fn record_timers_fired(&mut self, count: usize) {
        self.timers_fired = self.timers_fired.saturating_add(count as u64);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            events: self.events,
            renders: self.renders,
            dirty_zones: self.dirty_zones,
            navigations: self.navigations,
            render_failures: self.render_failures,
            timers_fired: self.timers_fired,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub events: u64,
    pub renders: u64,
    pub dirty_zones: u64,
    pub navigations: u64,
    pub render_failures: u64,
    pub timers_fired: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "runtime_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("events".to_string(), json!(self.events));
        map.insert("renders".to_string(), json!(self.renders));
        map.insert("dirty_zones".to_string(), json!(self.dirty_zones));
        map.insert("navigations".to_string(), json!(self.navigations));
        map.insert("render_failures".to_string(), json!(self.render_failures));
        map.insert("timers_fired".to_string(), json!(self.timers_fired));
        map
    }
}
