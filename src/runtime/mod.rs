//! Terminal event loop.
//!
//! [`FolioRuntime`] owns one [`FolioApp`] plus the zone registry and the
//! renderer. Every crossterm event or tick is handed to the app; afterwards
//! the app's frame is diffed against the registry and only changed zones are
//! written to the terminal.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use serde_json::json;

use crate::error::Result;
use crate::geometry::Size;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::RuntimeMetrics;
use crate::registry::ZoneRegistry;
use crate::render::AnsiRenderer;
use crate::shell::{AppSignal, FolioApp, Instruments, PageSet, ShellConfig, portfolio_pages};

use self::audit::{NullRuntimeAudit, RuntimeAudit, RuntimeAuditEventBuilder, RuntimeAuditStage};

pub mod audit;
pub mod driver;

/// Configuration knobs for the runtime loop.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Interval between synthetic tick events.
    pub tick_interval: Duration,
    /// Optional structured logger used by the runtime.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<RuntimeMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Lifecycle audit sink.
    pub audit: Arc<dyn RuntimeAudit>,
    pub shell: ShellConfig,
    /// Pages registered with every application instance.
    pub pages: PageSet,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "folio::runtime.metrics".to_string(),
            audit: Arc::new(NullRuntimeAudit),
            shell: ShellConfig::default(),
            pages: portfolio_pages(),
        }
    }
}

impl RuntimeConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(RuntimeMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RuntimeMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn RuntimeAudit>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_shell(mut self, shell: ShellConfig) -> Self {
        self.shell = shell;
        self
    }

    pub fn with_pages(mut self, pages: PageSet) -> Self {
        self.pages = pages;
        self
    }

    fn instruments(&self) -> Instruments {
        Instruments {
            logger: self.logger.clone(),
            metrics: self.metrics_handle(),
            audit: Arc::clone(&self.audit),
        }
    }
}

/// Events fed into the runtime.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Tick { elapsed: Duration },
    Key(KeyEvent),
    Resize(Size),
}

/// Whether a handler used an event or let it fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Consumed,
}

pub struct FolioRuntime {
    app: FolioApp,
    registry: ZoneRegistry,
    renderer: AnsiRenderer,
    config: RuntimeConfig,
    size: Size,
    should_exit: bool,
    redraw_requested: bool,
    start_instant: Option<Instant>,
    last_metrics_emit: Option<Instant>,
}

impl FolioRuntime {
    pub fn new(mut config: RuntimeConfig, renderer: AnsiRenderer, initial_size: Size) -> Result<Self> {
        if config.metrics.is_none() && config.metrics_interval > Duration::ZERO {
            config.enable_metrics();
        }
        let app = FolioApp::with_pages(config.shell.clone(), config.pages.clone(), config.instruments())?;

        Ok(Self {
            app,
            registry: ZoneRegistry::new(),
            renderer,
            config,
            size: initial_size,
            should_exit: false,
            redraw_requested: true,
            start_instant: None,
            last_metrics_emit: None,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn app(&self) -> &FolioApp {
        &self.app
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.redraw_requested = true;
        self.log_runtime_event(
            LogLevel::Info,
            "resized",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
            ],
        );
    }

    pub fn run(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.bootstrap(stdout)?;
        let mut last_tick = Instant::now();

        while !self.should_exit {
            let timeout = self
                .config
                .tick_interval
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                if let Some(runtime_event) = Self::map_event(event::read()?) {
                    self.dispatch_event(runtime_event)?;
                    self.render_if_needed(stdout)?;
                    if self.should_exit {
                        break;
                    }
                }
            }

            if last_tick.elapsed() >= self.config.tick_interval {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick);
                last_tick = now;
                self.dispatch_event(RuntimeEvent::Tick { elapsed })?;
                self.render_if_needed(stdout)?;
            }

            self.maybe_emit_metrics();
        }

        self.finalize();
        Ok(())
    }

    /// Drive the runtime from a fixed list of events instead of the terminal.
    pub fn run_scripted<I>(&mut self, stdout: &mut impl Write, events: I) -> Result<()>
    where
        I: IntoIterator<Item = RuntimeEvent>,
    {
        self.bootstrap(stdout)?;
        for event in events {
            self.dispatch_event(event)?;
            self.render_if_needed(stdout)?;
            if self.should_exit {
                break;
            }
        }
        self.finalize();
        Ok(())
    }

    fn dispatch_event(&mut self, event: RuntimeEvent) -> Result<()> {
        let mut signal = AppSignal::Continue;
        match &event {
            RuntimeEvent::Tick { elapsed } => {
                self.app.advance(*elapsed);
            }
            RuntimeEvent::Key(key) => signal = self.app.handle_key(key),
            RuntimeEvent::Resize(size) => self.resize(*size),
        }
        self.redraw_requested = true;

        match signal {
            AppSignal::Continue => {}
            AppSignal::Quit => {
                self.should_exit = true;
                self.log_runtime_event(LogLevel::Info, "exit_requested", std::iter::empty());
            }
            AppSignal::Reload => {
                self.app.reload()?;
                self.registry.invalidate();
            }
        }

        self.record_event_metric();
        if !matches!(event, RuntimeEvent::Tick { .. }) {
            self.log_runtime_event(
                LogLevel::Debug,
                "event_dispatched",
                [json_kv("event", json!(Self::describe_event(&event)))],
            );
        }
        self.maybe_emit_metrics();
        Ok(())
    }

    fn render_if_needed(&mut self, stdout: &mut impl Write) -> Result<()> {
        if !self.redraw_requested {
            return Ok(());
        }
        self.redraw_requested = false;

        let frame = self.app.frame(self.size);
        self.registry.sync_layout(&frame.rects());
        for zone in frame.zones {
            self.registry.apply_lines(zone.zone, zone.lines)?;
        }

        let dirty = self.registry.take_dirty();
        if dirty.is_empty() {
            self.config
                .audit
                .record(RuntimeAuditEventBuilder::new(RuntimeAuditStage::RenderSkipped).finish());
            return Ok(());
        }

        self.renderer.render(stdout, &dirty)?;
        self.record_render_metric(dirty.len());
        self.config.audit.record(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::RenderCommitted)
                .detail("dirty_zones", dirty.len())
                .finish(),
        );
        self.log_runtime_event(
            LogLevel::Trace,
            "render_completed",
            [json_kv("dirty_zones", json!(dirty.len()))],
        );
        Ok(())
    }

    fn map_event(event: CrosstermEvent) -> Option<RuntimeEvent> {
        match event {
            CrosstermEvent::Key(key) => Some(RuntimeEvent::Key(key)),
            CrosstermEvent::Resize(width, height) => Some(RuntimeEvent::Resize(Size::new(width, height))),
            _ => None,
        }
    }

    fn bootstrap(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.should_exit = false;
        self.redraw_requested = true;
        let now = Instant::now();
        self.start_instant = Some(now);
        self.last_metrics_emit = Some(now);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_started",
            [
                json_kv("width", json!(self.size.width)),
                json_kv("height", json!(self.size.height)),
                json_kv("tick_ms", json!(self.config.tick_interval.as_millis() as u64)),
            ],
        );
        self.render_if_needed(stdout)
    }

    fn finalize(&mut self) {
        self.app.shutdown();
        let uptime_ms = self
            .start_instant
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_stopped",
            [json_kv("uptime_ms", json!(uptime_ms))],
        );
        self.config.audit.record(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::RuntimeStopped)
                .detail("uptime_ms", uptime_ms)
                .finish(),
        );
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, "folio::runtime", message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record_event_metric(&mut self) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_event();
            }
        }
    }

    fn record_render_metric(&mut self, dirty_count: usize) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_render(dirty_count);
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics.is_none() || self.config.metrics_interval == Duration::ZERO {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => {
                return;
            }
            _ => {
                self.last_metrics_emit = Some(now);
            }
        }

        let uptime = self
            .start_instant
            .map(|start| now.duration_since(start))
            .unwrap_or_default();

        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let target = self.config.metrics_target.as_str();
                let _ = logger.log_event(guard.snapshot(uptime).to_log_event(target));
            }
        }
    }

    fn describe_event(event: &RuntimeEvent) -> &'static str {
        match event {
            RuntimeEvent::Tick { .. } => "tick",
            RuntimeEvent::Key(_) => "key",
            RuntimeEvent::Resize(_) => "resize",
        }
    }
}
