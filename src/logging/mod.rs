//! Structured JSON-lines logging.
//!
//! Every runtime, shell and boundary diagnostic is a [`LogEvent`] handed to a
//! [`LogSink`]. The CLI writes to a [`FileSink`]; tests and the default
//! binary setup capture events in a [`MemorySink`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

pub type LogFields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub ts_ms: u128,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "LogFields::is_empty", default)]
    pub fields: LogFields,
}

impl LogEvent {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: LogFields::new(),
        }
    }

    pub fn with_fields(
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
        fields: LogFields,
    ) -> Self {
        Self {
            fields,
            ..Self::new(level, target, message)
        }
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("log sink lock poisoned")]
    Poisoned,
}

pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> LoggingResult<()>;
}

/// Cloneable handle over a shared sink with a minimum level filter.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self::from_shared(Arc::new(sink))
    }

    /// Wrap an already shared sink, e.g. a [`MemorySink`] the caller keeps
    /// for inspection.
    pub fn from_shared(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: LogLevel::Trace,
        }
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) -> LoggingResult<()> {
        self.log_event(LogEvent::new(level, target, message))
    }

    pub fn log_with_fields(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: LogFields,
    ) -> LoggingResult<()> {
        self.log_event(LogEvent::with_fields(level, target, message, fields))
    }

    pub fn log_event(&self, event: LogEvent) -> LoggingResult<()> {
        if !self.enabled(event.level) {
            return Ok(());
        }
        self.sink.log(&event)
    }
}

/// Appends JSON lines to a file, truncating it once it would exceed
/// `max_bytes` (zero disables the cap).
pub struct FileSink {
    path: PathBuf,
    max_bytes: u64,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            max_bytes,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write_line(&self, mut line: String) -> LoggingResult<()> {
        line.push('\n');
        let mut guard = self.writer.lock().map_err(|_| LoggingError::Poisoned)?;

        if self.should_rotate(guard.get_ref(), line.len() as u64)? {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)?;
            *guard = BufWriter::new(file);
        }

        guard.write_all(line.as_bytes())?;
        guard.flush()?;
        Ok(())
    }

    fn should_rotate(&self, file: &File, incoming_len: u64) -> std::io::Result<bool> {
        if self.max_bytes == 0 {
            return Ok(false);
        }
        let current = file.metadata()?.len();
        Ok(current + incoming_len > self.max_bytes)
    }
}

impl LogSink for FileSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        let line = serde_json::to_string(event)?;
        self.write_line(line)
    }
}

/// Bounded in-memory buffer keeping the most recent events.
pub struct MemorySink {
    capacity: usize,
    events: Mutex<VecDeque<LogEvent>>,
}

impl MemorySink {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            events: Mutex::new(VecDeque::new()),
        }
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|guard| guard.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn events_at(&self, level: LogLevel) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.level >= level)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        let mut guard = self.events.lock().map_err(|_| LoggingError::Poisoned)?;
        if guard.len() == self.capacity {
            guard.pop_front();
        }
        guard.push_back(event.clone());
        Ok(())
    }
}

pub fn event_with_fields(
    level: LogLevel,
    target: &str,
    message: &str,
    fields: impl IntoIterator<Item = (String, Value)>,
) -> LogEvent {
    let map: LogFields = fields.into_iter().collect();
    LogEvent::with_fields(level, target, message, map)
}

pub fn json_kv(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_sink_keeps_latest_events() {
        let sink = Arc::new(MemorySink::new(2));
        let logger = Logger::from_shared(sink.clone());
        for message in ["one", "two", "three"] {
            logger.log(LogLevel::Info, "folio::test", message).unwrap();
        }
        let messages: Vec<_> = sink.events().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn min_level_filters_events() {
        let sink = Arc::new(MemorySink::new(8));
        let logger = Logger::from_shared(sink.clone()).with_min_level(LogLevel::Warn);
        logger.log(LogLevel::Debug, "folio::test", "quiet").unwrap();
        logger.log(LogLevel::Error, "folio::test", "loud").unwrap();
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "loud");
    }

    #[test]
    fn event_serializes_as_json_line() {
        let event = event_with_fields(
            LogLevel::Warn,
            "folio::shell",
            "navigated",
            [json_kv("path", json!("/skills"))],
        );
        let line = serde_json::to_string(&event).unwrap();
        assert!(line.contains("\"level\":\"warn\""));
        assert!(line.contains("\"path\":\"/skills\""));
    }

    #[test]
    fn file_sink_truncates_past_cap() {
        let path = std::env::temp_dir().join(format!("folio-log-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let logger = Logger::new(FileSink::new(&path, 200).unwrap());
        for _ in 0..10 {
            logger.log(LogLevel::Info, "folio::test", "filler").unwrap();
        }
        let len = std::fs::metadata(&path).unwrap().len();
        assert!(len <= 200);
        let _ = std::fs::remove_file(&path);
    }
}
