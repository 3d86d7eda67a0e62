//! Pages and the manager that mounts them.
//!
//! A page is a small state machine behind the [`Page`] trait. It never
//! touches shell state directly; navigation and timers are requested through
//! the [`PageContext`] handed to each hook and applied by the shell once the
//! hook returns.

use std::time::Duration;

use crossterm::event::KeyEvent;
use crossterm::style::Stylize;

use crate::error::PageResult;
use crate::geometry::Size;
use crate::router::PageId;
use crate::runtime::EventFlow;
use crate::timer::TimerKey;

pub mod contact;
pub mod home;
mod manager;
pub mod projects;
pub mod skills;

pub use contact::{ContactPage, ContactTimings};
pub use home::HomePage;
pub use manager::{PageDefinition, PageFactory, PageManager, PageMetadata};
pub use projects::ProjectsPage;
pub use skills::SkillsPage;

/// Lifecycle events emitted around page mounting/unmounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLifecycleEvent {
    WillAppear,
    DidAppear,
    WillDisappear,
    DidDisappear,
}

/// Side effects a page asks the shell to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Navigate(String),
    Schedule { key: TimerKey, delay: Duration },
    Cancel(TimerKey),
}

/// Context passed to page hooks. Requests are applied after the hook returns.
pub struct PageContext<'a> {
    path: &'a str,
    requests: Vec<PageRequest>,
}

impl<'a> PageContext<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            requests: Vec::new(),
        }
    }

    /// Path the shell is currently showing.
    pub fn path(&self) -> &str {
        self.path
    }

    pub fn navigate(&mut self, path: impl Into<String>) {
        self.requests.push(PageRequest::Navigate(path.into()));
    }

    pub fn schedule(&mut self, key: TimerKey, delay: Duration) {
        self.requests.push(PageRequest::Schedule { key, delay });
    }

    pub fn cancel(&mut self, key: TimerKey) {
        self.requests.push(PageRequest::Cancel(key));
    }

    pub fn into_requests(self) -> Vec<PageRequest> {
        self.requests
    }
}

/// Rendered page body: unwrapped lines, styled with ANSI escapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    lines: Vec<String>,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Page title followed by a blank line.
    pub fn title(&mut self, text: &str) -> &mut Self {
        self.line(text.bold().underlined().to_string()).blank()
    }

    /// Section heading preceded by a blank line.
    pub fn heading(&mut self, text: &str) -> &mut Self {
        self.blank().line(text.bold().cyan().to_string())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Key hint rendered as `[k] label`.
pub(crate) fn action(key: &str, label: &str) -> String {
    format!("{} {}", format!("[{key}]").yellow(), label)
}

/// Contract implemented by every page.
pub trait Page: Send {
    fn id(&self) -> PageId;

    fn render(&self, area: Size) -> PageResult<PageView>;

    fn handle_key(&mut self, _ctx: &mut PageContext<'_>, _key: &KeyEvent) -> PageResult<EventFlow> {
        Ok(EventFlow::Continue)
    }

    fn on_timer(&mut self, _ctx: &mut PageContext<'_>, _key: TimerKey) -> PageResult<()> {
        Ok(())
    }

    fn on_lifecycle(&mut self, _event: PageLifecycleEvent) -> PageResult<()> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn plain(text: &str) -> String {
        let clean = strip_ansi_escapes::strip(text);
        String::from_utf8_lossy(&clean).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_collects_requests_in_order() {
        let mut ctx = PageContext::new("/contact");
        ctx.cancel("a");
        ctx.schedule("a", Duration::from_millis(10));
        ctx.navigate("/");
        assert_eq!(ctx.path(), "/contact");
        assert_eq!(
            ctx.into_requests(),
            vec![
                PageRequest::Cancel("a"),
                PageRequest::Schedule {
                    key: "a",
                    delay: Duration::from_millis(10)
                },
                PageRequest::Navigate("/".into()),
            ]
        );
    }

    #[test]
    fn view_builder_spacing() {
        let mut view = PageView::new();
        view.title("Skills").line("body").heading("Next");
        assert_eq!(view.lines().len(), 5);
        assert_eq!(testing::plain(&view.lines()[0]), "Skills");
        assert!(view.lines()[3].is_empty());
    }
}
