//! Loading placeholder shown before the shell mounts.

use std::time::Duration;

use crossterm::style::Stylize;

use crate::geometry::Size;
use crate::timer::{FiredTimer, TimerError, TimerHandle, TimerKey, TimerOwner, TimerQueue};

pub const BOOTSTRAP_TIMER: TimerKey = "app.bootstrap";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Starts loading and flips to loaded exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadState {
    loading: bool,
}

impl Default for LoadState {
    fn default() -> Self {
        Self { loading: true }
    }
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns `true` only for the transition itself.
    fn finish(&mut self) -> bool {
        std::mem::replace(&mut self.loading, false)
    }
}

#[derive(Debug)]
pub struct BootstrapSequencer {
    state: LoadState,
    delay: Duration,
    handle: Option<TimerHandle>,
    frame: usize,
}

impl BootstrapSequencer {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: LoadState::default(),
            delay,
            handle: None,
            frame: 0,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Arm the loading timer.
    pub fn start(&mut self, timers: &mut TimerQueue) -> Result<(), TimerError> {
        let handle = timers.schedule(TimerOwner::App, BOOTSTRAP_TIMER, self.delay)?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Consume `fired` if it is the loading timer. Returns `true` when loading
    /// just completed.
    pub fn on_fired(&mut self, fired: &FiredTimer) -> bool {
        if Some(fired.handle) != self.handle {
            return false;
        }
        self.handle = None;
        self.state.finish()
    }

    /// Disarm the loading timer without completing.
    pub fn cancel(&mut self, timers: &mut TimerQueue) {
        if let Some(handle) = self.handle.take() {
            timers.cancel(handle);
        }
    }

    /// Advance the spinner.
    pub fn tick(&mut self) {
        if self.is_loading() {
            self.frame = (self.frame + 1) % SPINNER.len();
        }
    }

    /// Placeholder lines roughly centred in `size`.
    pub fn placeholder(&self, size: Size) -> Vec<String> {
        let label = format!("{} Loading...", SPINNER[self.frame]);
        let top = (size.height / 2) as usize;
        let left = (size.width as usize).saturating_sub(label.chars().count()) / 2;
        let mut lines = vec![String::new(); top];
        lines.push(format!("{}{}", " ".repeat(left), label.cyan()));
        lines
    }
}
