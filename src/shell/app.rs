use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_json::json;

use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::layout::SCREEN_ZONE;
use crate::logging::{LogLevel, json_kv};
use crate::router::RouteTable;
use crate::runtime::audit::{RuntimeAuditEventBuilder, RuntimeAuditStage};
use crate::timer::TimerQueue;

use super::bootstrap::BootstrapSequencer;
use super::core::{PortfolioShell, ShellSignal};
use super::{Frame, Instruments, PageSet, ShellConfig, portfolio_pages};

/// What the runtime should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSignal {
    Continue,
    Quit,
    Reload,
}

/// One application instance: loading state, timers and the shell.
pub struct FolioApp {
    config: ShellConfig,
    pages: PageSet,
    instruments: Instruments,
    timers: TimerQueue,
    bootstrap: BootstrapSequencer,
    shell: PortfolioShell,
}

impl FolioApp {
    /// Start a new instance with the portfolio pages. The shell mounts once
    /// the bootstrap delay elapses.
    pub fn new(config: ShellConfig, instruments: Instruments) -> Result<Self> {
        Self::with_pages(config, portfolio_pages(), instruments)
    }

    pub fn with_pages(config: ShellConfig, pages: PageSet, instruments: Instruments) -> Result<Self> {
        let mut timers = TimerQueue::new();
        let mut bootstrap = BootstrapSequencer::new(config.bootstrap_delay);
        bootstrap.start(&mut timers)?;

        let shell = PortfolioShell::new(
            config.clone(),
            RouteTable::portfolio(),
            pages(&config),
            instruments.clone(),
        );

        instruments.log(
            LogLevel::Info,
            "bootstrap_started",
            [
                json_kv("delay_ms", json!(config.bootstrap_delay.as_millis() as u64)),
                json_kv("location", json!(config.initial_location)),
            ],
        );
        instruments.audit(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::BootstrapStarted)
                .detail("delay_ms", config.bootstrap_delay.as_millis() as u64)
                .finish(),
        );

        Ok(Self {
            config,
            pages,
            instruments,
            timers,
            bootstrap,
            shell,
        })
    }

    pub fn is_loading(&self) -> bool {
        self.bootstrap.is_loading()
    }

    pub fn shell(&self) -> &PortfolioShell {
        &self.shell
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> AppSignal {
        if key.kind != KeyEventKind::Press {
            return AppSignal::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppSignal::Quit;
        }
        if self.is_loading() {
            return match key.code {
                KeyCode::Char('q') => AppSignal::Quit,
                _ => AppSignal::Continue,
            };
        }
        match self.shell.handle_key(&mut self.timers, key) {
            ShellSignal::Continue => AppSignal::Continue,
            ShellSignal::Quit => AppSignal::Quit,
            ShellSignal::Reload => AppSignal::Reload,
        }
    }

    /// Move virtual time forward and deliver every timer that came due.
    /// Returns how many fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.bootstrap.tick();
        let fired = self.timers.advance(elapsed);
        for timer in &fired {
            if self.bootstrap.on_fired(timer) {
                self.instruments.audit(
                    RuntimeAuditEventBuilder::new(RuntimeAuditStage::TimerFired)
                        .detail("key", timer.key)
                        .finish(),
                );
                self.instruments.log(
                    LogLevel::Info,
                    "bootstrap_completed",
                    [json_kv("elapsed_ms", json!(self.timers.now().as_millis() as u64))],
                );
                self.shell.mount(&mut self.timers);
            } else {
                self.shell.deliver_timer(&mut self.timers, timer);
            }
        }
        self.instruments
            .with_metrics(|metrics| metrics.record_timers_fired(fired.len()));
        fired.len()
    }

    pub fn frame(&mut self, size: Size) -> Frame {
        if self.is_loading() {
            return Frame::single(
                SCREEN_ZONE,
                Rect::new(0, 0, size.width, size.height),
                self.bootstrap.placeholder(size),
            );
        }
        self.shell.frame(size)
    }

    /// Tear down: unmount the page and cancel every pending timer, including
    /// the bootstrap timer if loading never finished.
    pub fn shutdown(&mut self) {
        self.bootstrap.cancel(&mut self.timers);
        self.shell.shutdown(&mut self.timers);
        let dropped = self.timers.cancel_all();
        self.instruments.log(
            LogLevel::Debug,
            "app_shutdown",
            [json_kv("timers_dropped", json!(dropped))],
        );
    }

    /// Replace this instance with a fresh one at the same location.
    pub fn reload(&mut self) -> Result<()> {
        let location = self.shell.current_path().to_string();
        self.shutdown();
        let config = self.config.clone().with_initial_location(location.clone());
        *self = Self::with_pages(config, self.pages.clone(), self.instruments.clone())?;
        self.instruments.log(
            LogLevel::Info,
            "reloaded",
            [json_kv("location", json!(location))],
        );
        self.instruments.audit(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::Reloaded)
                .detail("location", location)
                .finish(),
        );
        Ok(())
    }
}
