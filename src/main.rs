use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::terminal;

use folio::{
    AnsiRenderer, CliDriver, FileSink, FolioRuntime, LogLevel, Logger, MemorySink, RuntimeConfig,
    ShellConfig, Size, location_from_hash,
};

const MEMORY_CAPACITY: usize = 256;

/// Browse the WR Web Design portfolio in the terminal.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Initial location, e.g. `/projects` or `#/contact`
    #[arg(long, env = "FOLIO_ROUTE", default_value = "")]
    route: String,

    /// Append JSON-lines diagnostics to this file
    #[arg(long, env = "FOLIO_LOG")]
    log_file: Option<PathBuf>,

    /// Truncate the log file once it would grow past this size (0 = never)
    #[arg(long, default_value_t = 1024 * 1024)]
    log_max_bytes: u64,

    /// How long the loading screen stays up, in milliseconds
    #[arg(long, default_value_t = 800)]
    splash_ms: u64,

    /// Interval between ticks, in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
}

/// Without a log file only warnings and errors are kept, so a captured
/// failure is still in the buffer when it is dumped on exit.
fn memory_logger(memory: Arc<MemorySink>) -> Logger {
    Logger::from_shared(memory).with_min_level(LogLevel::Warn)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let memory = Arc::new(MemorySink::new(MEMORY_CAPACITY));
    let logger = match cli.log_file.as_ref() {
        Some(path) => match FileSink::new(path, cli.log_max_bytes) {
            Ok(sink) => Logger::new(sink),
            Err(err) => {
                eprintln!("folio: cannot open log file {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => memory_logger(memory.clone()),
    };

    let shell = ShellConfig::default()
        .with_initial_location(location_from_hash(&cli.route))
        .with_bootstrap_delay(Duration::from_millis(cli.splash_ms));
    let mut config = RuntimeConfig::default().with_logger(logger).with_shell(shell);
    config.tick_interval = Duration::from_millis(cli.tick_ms.max(1));

    let (width, height) = terminal::size().unwrap_or((80, 24));
    let result = FolioRuntime::new(config, AnsiRenderer::with_default(), Size::new(width, height))
        .map_err(Into::into)
        .and_then(|runtime| CliDriver::new(runtime).run());

    // Errors captured in memory only become visible once the alternate
    // screen is gone.
    for event in memory.events_at(LogLevel::Error) {
        if let Ok(line) = serde_json::to_string(&event) {
            eprintln!("{line}");
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("folio: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_logger_keeps_errors_through_routine_traffic() {
        let memory = Arc::new(MemorySink::new(MEMORY_CAPACITY));
        let logger = memory_logger(memory.clone());
        logger.log(LogLevel::Error, "folio::boundary", "render_failure_caught").unwrap();
        for _ in 0..MEMORY_CAPACITY * 2 {
            logger.log(LogLevel::Info, "folio::shell", "navigated").unwrap();
        }
        let errors = memory.events_at(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "render_failure_caught");
    }
}
