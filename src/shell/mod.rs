//! The portfolio shell: bootstrap, chrome, routing and the error boundary
//! wired together.
//!
//! [`FolioApp`] is one application instance. It owns the timer queue and the
//! loading state and, once loading finishes, mounts the [`PortfolioShell`].
//! A reload builds a brand-new `FolioApp` at the same location.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::boundary::{DiagnosticSink, NullDiagnosticSink};
use crate::geometry::Rect;
use crate::layout::ZoneId;
use crate::logging::{LogLevel, Logger, event_with_fields};
use crate::metrics::RuntimeMetrics;
use crate::pages::{
    ContactPage, ContactTimings, HomePage, Page, PageDefinition, PageManager, PageMetadata, ProjectsPage, SkillsPage,
};
use crate::router::PageId;
use crate::runtime::audit::{NullRuntimeAudit, RuntimeAudit, RuntimeAuditEvent};

mod app;
pub mod bootstrap;
pub mod chrome;
mod core;

pub use self::core::{PortfolioShell, ShellSignal};
pub use app::{AppSignal, FolioApp};
pub use bootstrap::{BOOTSTRAP_TIMER, BootstrapSequencer, LoadState};

/// Builds the page set for one application instance.
pub type PageSet = Arc<dyn Fn(&ShellConfig) -> PageManager + Send + Sync>;

/// Shell tunables. The binary fills these from command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// How long the loading placeholder stays up.
    pub bootstrap_delay: Duration,
    pub contact: ContactTimings,
    /// Terminals narrower than this many columns get the collapsible menu.
    pub compact_breakpoint: u16,
    /// Path shown once loading finishes. Empty means "untouched", which
    /// resolves to Home.
    pub initial_location: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            bootstrap_delay: Duration::from_millis(800),
            contact: ContactTimings::default(),
            compact_breakpoint: 64,
            initial_location: String::new(),
        }
    }
}

impl ShellConfig {
    pub fn with_initial_location(mut self, location: impl Into<String>) -> Self {
        self.initial_location = location.into();
        self
    }

    pub fn with_bootstrap_delay(mut self, delay: Duration) -> Self {
        self.bootstrap_delay = delay;
        self
    }
}

fn describe(definition: PageDefinition, description: &str, shortcuts: &[&str]) -> PageDefinition {
    definition.with_metadata(PageMetadata {
        description: Some(description.to_string()),
        shortcuts: shortcuts.iter().map(|key| key.to_string()).collect(),
    })
}

/// The four portfolio pages.
pub fn portfolio_pages() -> PageSet {
    Arc::new(|config: &ShellConfig| {
        let timings = config.contact;
        let mut manager = PageManager::new();
        manager.register_page(describe(
            PageDefinition::new(
                PageId::Home,
                "Home",
                Arc::new(|| Box::new(HomePage::new()) as Box<dyn Page>),
            ),
            "Hero, about, skill summary and featured projects",
            &["p", "s", "c"],
        ));
        manager.register_page(describe(
            PageDefinition::new(
                PageId::Projects,
                "Projects",
                Arc::new(|| Box::new(ProjectsPage::new()) as Box<dyn Page>),
            ),
            "Project cards with a category filter",
            &["Left", "Right"],
        ));
        manager.register_page(describe(
            PageDefinition::new(
                PageId::Skills,
                "Skills",
                Arc::new(|| Box::new(SkillsPage::new()) as Box<dyn Page>),
            ),
            "Skills grouped by category with level bars",
            &[],
        ));
        manager.register_page(describe(
            PageDefinition::new(
                PageId::Contact,
                "Contact",
                Arc::new(move || Box::new(ContactPage::new(timings)) as Box<dyn Page>),
            ),
            "Contact details, social links and the message form",
            &["Tab", "BackTab", "Enter", "Esc"],
        ));
        manager
    })
}

/// Logger, metrics and audit handles shared by the runtime, the app and the
/// shell. Every handle is optional except the audit sink, which defaults to
/// a no-op.
#[derive(Clone)]
pub struct Instruments {
    pub logger: Option<Logger>,
    pub metrics: Option<Arc<Mutex<RuntimeMetrics>>>,
    pub audit: Arc<dyn RuntimeAudit>,
}

impl Default for Instruments {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            audit: Arc::new(NullRuntimeAudit),
        }
    }
}

impl Instruments {
    pub(crate) fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, "folio::shell", message, fields);
            let _ = logger.log_event(event);
        }
    }

    pub(crate) fn audit(&self, event: RuntimeAuditEvent) {
        self.audit.record(event);
    }

    pub(crate) fn with_metrics(&self, update: impl FnOnce(&mut RuntimeMetrics)) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }

    /// Where the error boundary reports caught failures.
    pub(crate) fn diagnostics(&self) -> Arc<dyn DiagnosticSink> {
        match self.logger.as_ref() {
            Some(logger) => Arc::new(logger.clone()),
            None => Arc::new(NullDiagnosticSink),
        }
    }
}

/// Lines destined for one zone of the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFrame {
    pub zone: ZoneId,
    pub rect: Rect,
    pub lines: Vec<String>,
}

/// Everything the application wants on screen for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub zones: Vec<ZoneFrame>,
}

impl Frame {
    pub fn single(zone: ZoneId, rect: Rect, lines: Vec<String>) -> Self {
        Self {
            zones: vec![ZoneFrame { zone, rect, lines }],
        }
    }

    pub fn push(&mut self, zone: ZoneId, rect: Rect, lines: Vec<String>) {
        self.zones.push(ZoneFrame { zone, rect, lines });
    }

    pub fn zone(&self, zone: ZoneId) -> Option<&ZoneFrame> {
        self.zones.iter().find(|frame| frame.zone == zone)
    }

    pub fn rects(&self) -> HashMap<ZoneId, Rect> {
        self.zones
            .iter()
            .map(|frame| (frame.zone, frame.rect))
            .collect()
    }

    /// All zone lines with escapes stripped, top to bottom.
    pub fn plain_text(&self) -> String {
        let mut zones: Vec<&ZoneFrame> = self.zones.iter().collect();
        zones.sort_by_key(|frame| frame.rect.y);
        let joined = zones
            .iter()
            .flat_map(|frame| frame.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n");
        let clean = strip_ansi_escapes::strip(joined);
        String::from_utf8_lossy(&clean).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_is_registered_with_a_description() {
        let manager = portfolio_pages()(&ShellConfig::default());
        for id in PageId::ALL {
            let definition = manager.definition(id).expect("registered");
            assert_eq!(definition.id, id);
            assert!(definition.metadata.description.is_some());
        }
        let contact = manager.definition(PageId::Contact).unwrap();
        assert!(contact.metadata.shortcuts.contains(&"Enter".to_string()));
    }

    #[test]
    fn plain_text_orders_zones_top_down() {
        let mut frame = Frame::default();
        frame.push("b", Rect::new(0, 5, 10, 1), vec!["second".into()]);
        frame.push("a", Rect::new(0, 0, 10, 1), vec!["\u{1b}[1mfirst\u{1b}[0m".into()]);
        assert_eq!(frame.plain_text(), "first\nsecond");
        assert_eq!(frame.rects().len(), 2);
        assert!(frame.zone("a").is_some());
    }
}
