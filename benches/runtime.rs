use std::io;
use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio::logging::{LogEvent, LogSink};
use folio::{
    AnsiRenderer, FolioRuntime, Logger, LoggingResult, Result, RuntimeConfig, RuntimeEvent,
    ShellConfig, Size, filter_projects, FilterCategory,
};
use folio::content::PROJECTS;

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

fn runtime_browse_script(c: &mut Criterion) {
    let script = browse_events();
    c.bench_function("runtime_browse_script", |b| {
        b.iter(|| {
            let mut runtime = build_runtime().expect("runtime");
            let mut sink = io::sink();
            runtime
                .run_scripted(&mut sink, black_box(script.clone()))
                .expect("scripted run");
        });
    });
}

fn runtime_contact_script(c: &mut Criterion) {
    let script = contact_events();
    c.bench_function("runtime_contact_script", |b| {
        b.iter(|| {
            let mut runtime = build_runtime().expect("runtime");
            let mut sink = io::sink();
            runtime
                .run_scripted(&mut sink, black_box(script.clone()))
                .expect("scripted run");
        });
    });
}

fn project_filter(c: &mut Criterion) {
    c.bench_function("project_filter_cycle", |b| {
        b.iter(|| {
            for category in [
                FilterCategory::All,
                FilterCategory::Web,
                FilterCategory::Mobile,
                FilterCategory::Desktop,
            ] {
                black_box(filter_projects(&PROJECTS, black_box(category)));
            }
        });
    });
}

fn build_runtime() -> Result<FolioRuntime> {
    let mut config = RuntimeConfig::default()
        .with_logger(Logger::new(NullSink))
        .with_shell(ShellConfig::default().with_bootstrap_delay(Duration::from_millis(100)));
    config.metrics_interval = Duration::ZERO;
    config.enable_metrics();
    FolioRuntime::new(config, AnsiRenderer::with_default(), Size::new(100, 30))
}

fn tick() -> RuntimeEvent {
    RuntimeEvent::Tick {
        elapsed: Duration::from_millis(100),
    }
}

fn key(code: KeyCode) -> RuntimeEvent {
    RuntimeEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn browse_events() -> Vec<RuntimeEvent> {
    let mut events = vec![tick(), tick()];
    for _ in 0..5 {
        for ch in ['2', '3', '4', '1'] {
            events.push(key(KeyCode::Char(ch)));
            events.push(key(KeyCode::PageDown));
            events.push(tick());
        }
        events.push(key(KeyCode::Char('2')));
        events.push(key(KeyCode::Right));
        events.push(key(KeyCode::Right));
        events.push(RuntimeEvent::Resize(Size::new(60, 30)));
        events.push(key(KeyCode::Char('m')));
        events.push(RuntimeEvent::Resize(Size::new(100, 30)));
    }
    events.push(key(KeyCode::Char('q')));
    events
}

fn contact_events() -> Vec<RuntimeEvent> {
    let mut events = vec![tick(), tick(), key(KeyCode::Char('4'))];
    for value in ["Ana", "ana@example.com", "Hola", "Quiero una web"] {
        events.push(key(KeyCode::Tab));
        events.extend(value.chars().map(|ch| key(KeyCode::Char(ch))));
    }
    events.push(key(KeyCode::Enter));
    events.extend(std::iter::repeat_with(tick).take(70));
    events.push(key(KeyCode::Esc));
    events.push(key(KeyCode::Char('q')));
    events
}

criterion_group!(benches, runtime_browse_script, runtime_contact_script, project_filter);
criterion_main!(benches);
