use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use serde_json::json;

use crate::boundary::{ErrorBoundary, GuardScope, Phase};
use crate::error::PageError;
use crate::geometry::{Rect, Size};
use crate::layout::{BODY_ZONE, FOOTER_ZONE, FrameLayout, HEADER_ZONE, SCREEN_ZONE};
use crate::logging::{LogLevel, json_kv};
use crate::nav::{NAV_LINKS, Navigation, NavigationState};
use crate::pages::{PageContext, PageManager, PageRequest};
use crate::router::{PageId, RouteTable, location_from_hash};
use crate::runtime::EventFlow;
use crate::runtime::audit::{RuntimeAuditEventBuilder, RuntimeAuditStage};
use crate::scroll::{ScrollController, ScrollOffset};
use crate::timer::{FiredTimer, MountId, TimerOwner, TimerQueue};
use crate::width::wrap_to_width;

use super::chrome::{current_year, footer_lines, header_lines};
use super::{Frame, Instruments, ShellConfig};

/// What the shell wants its owner to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellSignal {
    Continue,
    Quit,
    Reload,
}

/// Navigation, scroll, the error boundary and the mounted page.
pub struct PortfolioShell {
    config: ShellConfig,
    routes: RouteTable,
    nav: NavigationState,
    scroll: ScrollController,
    boundary: ErrorBoundary,
    pages: PageManager,
    prompt: Option<String>,
    compact: bool,
    content_rows: usize,
    viewport_rows: u16,
    instruments: Instruments,
}

impl PortfolioShell {
    pub fn new(config: ShellConfig, routes: RouteTable, pages: PageManager, instruments: Instruments) -> Self {
        let nav = NavigationState::new(config.initial_location.clone());
        let boundary = ErrorBoundary::new(instruments.diagnostics());
        Self {
            config,
            routes,
            nav,
            scroll: ScrollController::new(),
            boundary,
            pages,
            prompt: None,
            compact: false,
            content_rows: 0,
            viewport_rows: 0,
            instruments,
        }
    }

    pub fn current_path(&self) -> &str {
        self.nav.current_path()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn menu_open(&self) -> bool {
        self.nav.menu_open()
    }

    pub fn active_page(&self) -> Option<PageId> {
        self.pages.active_id()
    }

    pub fn active_mount(&self) -> Option<MountId> {
        self.pages.active_mount()
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.scroll.offset()
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    pub fn is_failed(&self) -> bool {
        self.boundary.is_failed()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Mount the page for the initial location. Called once loading ends.
    pub fn mount(&mut self, timers: &mut TimerQueue) {
        let path = self.nav.current_path().to_string();
        if self.scroll.observe(&path) {
            self.audit_scroll_reset(&path);
        }
        let target = self.routes.resolve(&path);
        self.mount_page(timers, target);
        self.instruments.log(
            LogLevel::Info,
            "shell_mounted",
            [json_kv("path", json!(path)), json_kv("page", json!(target.as_str()))],
        );
        self.instruments.audit(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::ShellMounted)
                .detail("path", path)
                .finish(),
        );
    }

    /// Move to `path`. The menu always closes; the page is remounted only
    /// when the path resolves to a different page.
    pub fn navigate(&mut self, timers: &mut TimerQueue, path: &str) -> Navigation {
        let navigation = self.nav.navigate(path);
        self.instruments.with_metrics(|metrics| metrics.record_navigation());
        self.instruments.log(
            LogLevel::Info,
            "navigated",
            [
                json_kv("from", json!(navigation.from)),
                json_kv("to", json!(navigation.to)),
                json_kv("menu_was_open", json!(navigation.menu_was_open)),
            ],
        );
        self.instruments.audit(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::Navigated)
                .detail("from", navigation.from.clone())
                .detail("to", navigation.to.clone())
                .finish(),
        );

        if self.scroll.observe(&navigation.to) {
            self.audit_scroll_reset(&navigation.to);
        }

        let target = self.routes.resolve(&navigation.to);
        if self.pages.active_id() != Some(target) {
            self.mount_page(timers, target);
        }
        navigation
    }

    pub fn toggle_menu(&mut self) -> bool {
        let open = self.nav.toggle_menu();
        self.instruments
            .log(LogLevel::Debug, "menu_toggled", [json_kv("open", json!(open))]);
        open
    }

    pub fn handle_key(&mut self, timers: &mut TimerQueue, key: &KeyEvent) -> ShellSignal {
        if key.kind != KeyEventKind::Press {
            return ShellSignal::Continue;
        }

        // The fallback owns the keyboard; a prompt left open underneath is dropped.
        if self.boundary.is_failed() {
            self.prompt = None;
            return match key.code {
                KeyCode::Char('r') => ShellSignal::Reload,
                KeyCode::Char('q') => ShellSignal::Quit,
                _ => ShellSignal::Continue,
            };
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(timers, key);
            return ShellSignal::Continue;
        }

        if self.dispatch_to_page(timers, key) == EventFlow::Consumed {
            return ShellSignal::Continue;
        }

        let page_rows = self.viewport_rows.saturating_sub(1).max(1) as i32;
        match key.code {
            KeyCode::Char('q') => return ShellSignal::Quit,
            KeyCode::Char(digit @ '1'..='4') if self.links_visible() => {
                let index = (digit as u8 - b'1') as usize;
                self.navigate(timers, NAV_LINKS[index].path);
            }
            KeyCode::Char('m') => {
                self.toggle_menu();
            }
            KeyCode::Char('g') => self.prompt = Some(String::new()),
            KeyCode::Up => self.scroll.scroll_by(-1, self.content_rows, self.viewport_rows),
            KeyCode::Down => self.scroll.scroll_by(1, self.content_rows, self.viewport_rows),
            KeyCode::PageUp => self.scroll.scroll_by(-page_rows, self.content_rows, self.viewport_rows),
            KeyCode::PageDown => self.scroll.scroll_by(page_rows, self.content_rows, self.viewport_rows),
            KeyCode::Home => self.scroll.scroll_to_top(),
            KeyCode::End => self.scroll.scroll_to_bottom(self.content_rows, self.viewport_rows),
            _ => {}
        }
        ShellSignal::Continue
    }

    /// Deliver a fired page timer to the mount that owns it. Timers of a
    /// mount that is no longer active are dropped.
    pub fn deliver_timer(&mut self, timers: &mut TimerQueue, fired: &FiredTimer) {
        let TimerOwner::Page(owner) = fired.owner else {
            return;
        };
        if self.pages.active_mount() != Some(owner) {
            return;
        }
        self.instruments.audit(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::TimerFired)
                .detail("key", fired.key)
                .detail("mount", owner)
                .finish(),
        );

        let path = self.nav.current_path().to_string();
        let scope = self.scope(Phase::Timer);
        let was_failed = self.boundary.is_failed();
        let mut ctx = PageContext::new(&path);
        let pages = &mut self.pages;
        self.boundary.guard(scope, || match pages.active_page_mut() {
            Some(page) => page.on_timer(&mut ctx, fired.key),
            None => Ok(()),
        });
        let requests = ctx.into_requests();
        self.after_guard(timers, was_failed);
        self.apply_requests(timers, owner, requests);
    }

    /// Build the frame for a terminal of `size`.
    pub fn frame(&mut self, size: Size) -> Frame {
        self.compact = size.width < self.config.compact_breakpoint;
        if self.boundary.is_failed() {
            return self.fallback_frame(size);
        }

        let header = header_lines(&self.nav, size.width, self.compact, self.prompt.as_deref());
        let footer = footer_lines(size.width, current_year());
        let layout = FrameLayout::solve(size, header.len() as u16, footer.len() as u16);

        let Some(body) = self.render_body(layout.body) else {
            return self.fallback_frame(size);
        };

        let mut frame = Frame::default();
        frame.push(HEADER_ZONE, layout.header, header);
        frame.push(BODY_ZONE, layout.body, body);
        frame.push(FOOTER_ZONE, layout.footer, footer);
        frame
    }

    /// Drop the active page and every timer it owns.
    pub fn shutdown(&mut self, timers: &mut TimerQueue) {
        let Some(mount) = self.pages.active_mount() else {
            return;
        };
        let scope = self.scope(Phase::Mount);
        let pages = &mut self.pages;
        self.boundary.guard(scope, || pages.unmount());
        timers.cancel_owner(TimerOwner::Page(mount));
    }

    fn render_body(&mut self, area: Rect) -> Option<Vec<String>> {
        let scope = self.scope(Phase::Render);
        let was_failed = self.boundary.is_failed();
        let pages = &self.pages;
        let view = self.boundary.guard(scope, || match pages.active_page() {
            Some(page) => page.render(area.size()),
            None => Err(PageError::Render("no page mounted".to_string())),
        });
        let Some(view) = view else {
            self.note_failure(was_failed);
            return None;
        };

        let wrapped: Vec<String> = view
            .lines()
            .iter()
            .flat_map(|line| wrap_to_width(line, area.width))
            .collect();
        self.content_rows = wrapped.len();
        self.viewport_rows = area.height;
        self.scroll.clamp(self.content_rows, self.viewport_rows);

        let offset = self.scroll.offset().y as usize;
        Some(
            wrapped
                .into_iter()
                .skip(offset)
                .take(area.height as usize)
                .collect(),
        )
    }

    fn fallback_frame(&self, size: Size) -> Frame {
        let view = self.boundary.fallback_view();
        let width = size.width.saturating_sub(4);
        let mut lines = vec![String::new(); (size.height / 3) as usize];
        lines.extend(
            view.lines()
                .iter()
                .flat_map(|line| wrap_to_width(line, width))
                .map(|line| format!("  {line}")),
        );
        Frame::single(SCREEN_ZONE, Rect::new(0, 0, size.width, size.height), lines)
    }

    fn links_visible(&self) -> bool {
        !self.compact || self.nav.menu_open()
    }

    fn handle_prompt_key(&mut self, timers: &mut TimerQueue, key: &KeyEvent) {
        let Some(buffer) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(ch) => buffer.push(ch),
            KeyCode::Enter => {
                let typed = self.prompt.take().unwrap_or_default();
                let target = if typed.starts_with('#') {
                    location_from_hash(&typed)
                } else {
                    typed.trim().to_string()
                };
                if !self.boundary.is_failed() {
                    self.navigate(timers, &target);
                }
            }
            _ => {}
        }
    }

    fn dispatch_to_page(&mut self, timers: &mut TimerQueue, key: &KeyEvent) -> EventFlow {
        let Some(mount) = self.pages.active_mount() else {
            return EventFlow::Continue;
        };
        let path = self.nav.current_path().to_string();
        let scope = self.scope(Phase::Input);
        let was_failed = self.boundary.is_failed();
        let mut ctx = PageContext::new(&path);
        let pages = &mut self.pages;
        let flow = self.boundary.guard(scope, || match pages.active_page_mut() {
            Some(page) => page.handle_key(&mut ctx, key),
            None => Ok(EventFlow::Continue),
        });
        let requests = ctx.into_requests();
        self.after_guard(timers, was_failed);
        self.apply_requests(timers, mount, requests);
        // A failed page swallows the key.
        flow.unwrap_or(EventFlow::Consumed)
    }

    /// Apply what a page queued on its context. Requests from a page that
    /// failed or was replaced meanwhile are dropped.
    fn apply_requests(&mut self, timers: &mut TimerQueue, mount: MountId, requests: Vec<PageRequest>) {
        for request in requests {
            if self.boundary.is_failed() || self.pages.active_mount() != Some(mount) {
                return;
            }
            let owner = TimerOwner::Page(mount);
            match request {
                PageRequest::Navigate(path) => {
                    self.navigate(timers, &path);
                }
                PageRequest::Cancel(key) => {
                    timers.cancel_key(owner, key);
                }
                PageRequest::Schedule { key, delay } => {
                    if let Err(err) = timers.schedule(owner, key, delay) {
                        let scope = self.scope(Phase::Timer);
                        let was_failed = self.boundary.is_failed();
                        self.boundary
                            .guard(scope, move || Err::<(), _>(PageError::from(err)));
                        self.after_guard(timers, was_failed);
                    }
                }
            }
        }
    }

    fn mount_page(&mut self, timers: &mut TimerQueue, target: PageId) {
        let previous = self.pages.active_mount();
        let scope = GuardScope::new(Some(target), self.nav.current_path(), Phase::Mount);
        let was_failed = self.boundary.is_failed();
        let pages = &mut self.pages;
        if let Some(mount) = self.boundary.guard(scope, || pages.mount(target)) {
            let title = self
                .pages
                .definition(target)
                .map(|definition| definition.title.clone());
            self.instruments.log(
                LogLevel::Debug,
                "page_mounted",
                [
                    json_kv("page", json!(target.as_str())),
                    json_kv("title", json!(title)),
                    json_kv("mount", json!(mount)),
                ],
            );
        }

        if let Some(old) = previous {
            if self.pages.active_mount() != Some(old) {
                timers.cancel_owner(TimerOwner::Page(old));
            }
        }
        self.after_guard(timers, was_failed);
    }

    /// Record a failure if the last guarded step tripped the boundary, and
    /// stop the failed page's timers.
    fn after_guard(&mut self, timers: &mut TimerQueue, was_failed: bool) {
        if self.note_failure(was_failed) {
            if let Some(mount) = self.pages.active_mount() {
                timers.cancel_owner(TimerOwner::Page(mount));
            }
        }
    }

    fn note_failure(&self, was_failed: bool) -> bool {
        if was_failed || !self.boundary.is_failed() {
            return false;
        }
        self.instruments
            .with_metrics(|metrics| metrics.record_render_failure());
        let mut event = RuntimeAuditEventBuilder::new(RuntimeAuditStage::RenderFailed)
            .detail("path", self.nav.current_path());
        if let Some(error) = self.boundary.error() {
            event = event
                .detail("phase", error.phase.as_str())
                .detail("panicked", error.panicked);
        }
        self.instruments.audit(event.finish());
        true
    }

    fn scope(&self, phase: Phase) -> GuardScope {
        GuardScope::new(self.pages.active_id(), self.nav.current_path(), phase)
    }

    fn audit_scroll_reset(&self, path: &str) {
        self.instruments.audit(
            RuntimeAuditEventBuilder::new(RuntimeAuditStage::ScrollReset)
                .detail("path", path)
                .finish(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::pages::testing::key;
    use crate::runtime::audit::RecordingAudit;
    use crate::shell::portfolio_pages;

    const WIDE: Size = Size::new(100, 30);

    fn shell_at(location: &str, audit: Arc<RecordingAudit>) -> (PortfolioShell, TimerQueue) {
        let config = ShellConfig::default().with_initial_location(location);
        let instruments = Instruments {
            audit,
            ..Instruments::default()
        };
        let pages = portfolio_pages()(&config);
        let mut shell = PortfolioShell::new(config, RouteTable::portfolio(), pages, instruments);
        let mut timers = TimerQueue::new();
        shell.mount(&mut timers);
        (shell, timers)
    }

    #[test]
    fn untouched_location_mounts_home() {
        let (mut shell, _timers) = shell_at("", Arc::default());
        assert_eq!(shell.active_page(), Some(PageId::Home));
        let frame = shell.frame(WIDE);
        assert!(frame.zone(HEADER_ZONE).is_some());
        assert!(frame.zone(BODY_ZONE).is_some());
        assert!(frame.plain_text().contains("All rights reserved."));
    }

    #[test]
    fn unknown_path_renders_home_without_error() {
        let (mut shell, mut timers) = shell_at("/", Arc::default());
        shell.navigate(&mut timers, "/does-not-exist");
        assert_eq!(shell.active_page(), Some(PageId::Home));
        assert!(!shell.is_failed());
        assert!(shell.frame(WIDE).plain_text().contains("Hello, I'm"));
    }

    #[test]
    fn number_keys_follow_header_links() {
        let (mut shell, mut timers) = shell_at("/", Arc::default());
        shell.handle_key(&mut timers, &key(KeyCode::Char('4')));
        assert_eq!(shell.current_path(), "/contact");
        assert_eq!(shell.active_page(), Some(PageId::Contact));
        shell.handle_key(&mut timers, &key(KeyCode::Char('2')));
        assert_eq!(shell.active_page(), Some(PageId::Projects));
    }

    #[test]
    fn navigation_closes_open_menu() {
        let (mut shell, mut timers) = shell_at("/", Arc::default());
        shell.frame(Size::new(40, 30));
        shell.handle_key(&mut timers, &key(KeyCode::Char('m')));
        assert!(shell.menu_open());
        shell.handle_key(&mut timers, &key(KeyCode::Char('3')));
        assert_eq!(shell.current_path(), "/skills");
        assert!(!shell.menu_open());
    }

    #[test]
    fn compact_terminal_hides_links_behind_menu() {
        let (mut shell, mut timers) = shell_at("/", Arc::default());
        let text = shell.frame(Size::new(40, 30)).plain_text();
        assert!(text.contains("Menu"));
        shell.handle_key(&mut timers, &key(KeyCode::Char('2')));
        assert_eq!(shell.current_path(), "/");
    }

    #[test]
    fn scroll_resets_once_per_path_change() {
        let audit = Arc::new(RecordingAudit::new());
        let (mut shell, mut timers) = shell_at("/", audit.clone());
        let small = Size::new(100, 12);
        shell.frame(small);
        shell.handle_key(&mut timers, &key(KeyCode::Down));
        shell.handle_key(&mut timers, &key(KeyCode::Down));
        assert_eq!(shell.scroll_offset().y, 2);

        shell.navigate(&mut timers, "/");
        assert_eq!(shell.scroll_offset().y, 2);

        shell.navigate(&mut timers, "/skills");
        assert_eq!(shell.scroll_offset(), ScrollOffset::default());
        // Mount plus the move to /skills.
        assert_eq!(audit.count(RuntimeAuditStage::ScrollReset), 2);
    }

    #[test]
    fn same_page_navigation_keeps_instance() {
        let (mut shell, mut timers) = shell_at("/", Arc::default());
        let mount = shell.active_mount();
        shell.navigate(&mut timers, "/elsewhere");
        assert_eq!(shell.active_mount(), mount);
        shell.navigate(&mut timers, "/skills");
        assert_ne!(shell.active_mount(), mount);
    }

    #[test]
    fn address_prompt_navigates_on_enter() {
        let (mut shell, mut timers) = shell_at("/", Arc::default());
        shell.handle_key(&mut timers, &key(KeyCode::Char('g')));
        assert_eq!(shell.prompt(), Some(""));
        for ch in "#/contact?ref=1".chars() {
            shell.handle_key(&mut timers, &key(KeyCode::Char(ch)));
        }
        assert!(shell.frame(WIDE).plain_text().contains("Go to: #/contact?ref=1"));
        shell.handle_key(&mut timers, &key(KeyCode::Enter));
        assert_eq!(shell.prompt(), None);
        assert_eq!(shell.current_path(), "/contact");

        shell.handle_key(&mut timers, &key(KeyCode::Char('g')));
        shell.handle_key(&mut timers, &key(KeyCode::Char('x')));
        shell.handle_key(&mut timers, &key(KeyCode::Esc));
        assert_eq!(shell.prompt(), None);
        assert_eq!(shell.current_path(), "/contact");
    }

    #[test]
    fn page_consumes_keys_before_shell() {
        let (mut shell, mut timers) = shell_at("/contact", Arc::default());
        shell.handle_key(&mut timers, &key(KeyCode::Tab));
        shell.handle_key(&mut timers, &key(KeyCode::Char('1')));
        assert_eq!(shell.current_path(), "/contact");
        assert_eq!(shell.handle_key(&mut timers, &key(KeyCode::Char('q'))), ShellSignal::Continue);
    }

    #[test]
    fn home_call_to_action_navigates() {
        let (mut shell, mut timers) = shell_at("/", Arc::default());
        shell.handle_key(&mut timers, &key(KeyCode::Char('p')));
        assert_eq!(shell.current_path(), "/projects");
        assert_eq!(shell.active_page(), Some(PageId::Projects));
    }
}
