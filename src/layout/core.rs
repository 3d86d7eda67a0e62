use std::collections::HashMap;

use crate::geometry::{Rect, Size};

pub type ZoneId = &'static str;

pub const HEADER_ZONE: ZoneId = "shell.header";
pub const BODY_ZONE: ZoneId = "shell.body";
pub const FOOTER_ZONE: ZoneId = "shell.footer";
/// Whole-terminal zone used by the loading placeholder and the error fallback.
pub const SCREEN_ZONE: ZoneId = "shell.screen";

/// Row allocation rule for one band of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Fixed(u16),
    Min(u16),
    Flex(u16),
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    length: u16,
    min: u16,
    flex: u16,
}

impl Segment {
    fn from_constraint(constraint: Constraint) -> Self {
        match constraint {
            Constraint::Fixed(rows) => Self {
                length: rows,
                min: 0,
                flex: 0,
            },
            Constraint::Min(rows) => Self {
                length: rows,
                min: rows,
                flex: 1,
            },
            Constraint::Flex(weight) => Self {
                length: 0,
                min: 0,
                flex: weight.max(1),
            },
        }
    }
}

/// Split `area` into vertically stacked rects, one per constraint.
///
/// Flexible bands share spare rows by weight. When the requested rows do not
/// fit, flexible bands give up rows first (down to their minimum) and fixed
/// bands are clipped from the bottom.
pub fn split_column(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    let mut segments: Vec<Segment> = constraints.iter().copied().map(Segment::from_constraint).collect();
    let available = area.height;
    let used: u16 = segments.iter().fold(0u16, |acc, s| acc.saturating_add(s.length));

    if used < available {
        grow(&mut segments, available - used);
    } else if used > available {
        shrink(&mut segments, used - available);
    }

    let mut cursor = area.y;
    let limit = area.y.saturating_add(area.height);
    segments
        .iter()
        .map(|segment| {
            let height = segment.length.min(limit.saturating_sub(cursor));
            let rect = Rect::new(area.x, cursor, area.width, height);
            cursor = cursor.saturating_add(height);
            rect
        })
        .collect()
}

fn grow(segments: &mut [Segment], spare: u16) {
    let total_flex: u32 = segments.iter().map(|s| s.flex as u32).sum();
    if total_flex == 0 {
        return;
    }
    let mut leftover = spare;
    for segment in segments.iter_mut().filter(|s| s.flex > 0) {
        let share = (spare as u32 * segment.flex as u32 / total_flex) as u16;
        segment.length += share;
        leftover -= share;
    }
    // Rounding remainder goes to the first flexible band.
    if let Some(first) = segments.iter_mut().find(|s| s.flex > 0) {
        first.length += leftover;
    }
}

fn shrink(segments: &mut [Segment], mut over: u16) {
    for segment in segments.iter_mut().filter(|s| s.flex > 0) {
        let give = segment.length.saturating_sub(segment.min).min(over);
        segment.length -= give;
        over -= give;
    }
}

/// Solved frame: one rect per zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl FrameLayout {
    /// Lay out the frame for a terminal of `size`. The body keeps at least one
    /// row whenever the terminal has room for it.
    pub fn solve(size: Size, header_rows: u16, footer_rows: u16) -> Self {
        let area = Rect::new(0, 0, size.width, size.height);
        let rects = split_column(
            area,
            &[
                Constraint::Fixed(header_rows),
                Constraint::Min(1),
                Constraint::Fixed(footer_rows),
            ],
        );
        Self {
            header: rects[0],
            body: rects[1],
            footer: rects[2],
        }
    }

    pub fn zones(&self) -> HashMap<ZoneId, Rect> {
        HashMap::from([
            (HEADER_ZONE, self.header),
            (BODY_ZONE, self.body),
            (FOOTER_ZONE, self.footer),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_takes_remaining_rows() {
        let frame = FrameLayout::solve(Size::new(80, 24), 3, 4);
        assert_eq!(frame.header, Rect::new(0, 0, 80, 3));
        assert_eq!(frame.body, Rect::new(0, 3, 80, 17));
        assert_eq!(frame.footer, Rect::new(0, 20, 80, 4));
    }

    #[test]
    fn flex_weights_share_spare_rows() {
        let rects = split_column(
            Rect::new(0, 0, 10, 10),
            &[Constraint::Flex(1), Constraint::Flex(3)],
        );
        assert_eq!(rects[0].height + rects[1].height, 10);
        assert_eq!(rects[1].height, 7);
        assert_eq!(rects[1].y, 3);
    }

    #[test]
    fn tiny_terminal_clips_footer_before_body_minimum() {
        let frame = FrameLayout::solve(Size::new(40, 6), 3, 4);
        assert_eq!(frame.header.height, 3);
        assert_eq!(frame.body.height, 1);
        assert_eq!(frame.footer.height, 2);
        assert_eq!(frame.footer.bottom(), 6);
    }

    #[test]
    fn zones_cover_all_three_bands() {
        let zones = FrameLayout::solve(Size::new(20, 10), 1, 1).zones();
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[BODY_ZONE].height, 8);
    }
}
