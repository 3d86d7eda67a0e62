use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use serde_json::json;
use thiserror::Error;

use crate::error::FolioError;
use crate::geometry::Size;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::runtime::FolioRuntime;

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error("runtime error: {0}")]
    Runtime(#[from] FolioError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Terminal driver that owns a `FolioRuntime` and manages raw mode and the
/// alternate screen around it.
pub struct CliDriver {
    runtime: FolioRuntime,
}

impl CliDriver {
    pub fn new(runtime: FolioRuntime) -> Self {
        Self { runtime }
    }

    pub fn run(mut self) -> DriverResult<()> {
        let mut stdout = io::stdout();
        let previous_hook = install_panic_hook(self.runtime.config().logger.clone());
        let result = TerminalGuard::enter(&mut stdout).and_then(|_terminal| self.run_inner(&mut stdout));
        panic::set_hook(previous_hook);
        result
    }

    fn run_inner(&mut self, stdout: &mut impl Write) -> DriverResult<()> {
        let (width, height) = terminal::size()?;
        self.runtime.resize(Size::new(width, height));
        self.runtime.run(stdout)?;
        Ok(())
    }
}

/// Raw mode and alternate screen for as long as it lives, restored on drop
/// even when the loop unwinds.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut impl Write) -> DriverResult<Self> {
        terminal::enable_raw_mode().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        execute!(io::stdout(), Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

/// Route panics to the log instead of stderr, which would scribble over the
/// alternate screen. Page panics are also caught and reported by the error
/// boundary; this records the raw panic and its location.
fn install_panic_hook(logger: Option<Logger>) -> PanicHook {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let Some(logger) = logger.as_ref() else {
            return;
        };
        let location = info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()));
        let event = event_with_fields(
            LogLevel::Error,
            "folio::runtime",
            "panic",
            [
                json_kv("message", json!(panic_text(info))),
                json_kv("location", json!(location)),
            ],
        );
        let _ = logger.log_event(event);
    }));
    previous
}

fn panic_text(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic".to_string()
    }
}
