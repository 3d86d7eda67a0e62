//! Body scroll position and the reset-on-navigation rule.

/// Scroll offset of the body zone, in cells from the top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: u16,
    pub y: u16,
}

/// Resets the body to the origin whenever the observed path changes.
#[derive(Debug, Default)]
pub struct ScrollController {
    observed: Option<String>,
    offset: ScrollOffset,
    resets: u64,
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current path. Returns `true` when this is a new path
    /// (including the very first observation) and the offset was reset.
    pub fn observe(&mut self, path: &str) -> bool {
        if self.observed.as_deref() == Some(path) {
            return false;
        }
        self.observed = Some(path.to_string());
        self.offset = ScrollOffset::default();
        self.resets += 1;
        true
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    /// Number of resets performed so far.
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Scroll vertically by `delta` rows, clamped so the last page of
    /// `content_rows` stays visible in a viewport of `viewport_rows`.
    pub fn scroll_by(&mut self, delta: i32, content_rows: usize, viewport_rows: u16) {
        let max = content_rows.saturating_sub(viewport_rows as usize);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        let next = (self.offset.y as i64 + delta as i64).clamp(0, max as i64);
        self.offset.y = next as u16;
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = ScrollOffset::default();
    }

    pub fn scroll_to_bottom(&mut self, content_rows: usize, viewport_rows: u16) {
        self.scroll_by(i32::MAX, content_rows, viewport_rows);
    }

    /// Pull the offset back in range after the content or viewport shrank.
    pub fn clamp(&mut self, content_rows: usize, viewport_rows: u16) {
        self.scroll_by(0, content_rows, viewport_rows);
    }
}
