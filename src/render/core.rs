use std::io::Write;

use crate::cursor::{move_to, reset_style};
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::ZoneId;
use crate::registry::ZoneState;
use crate::width::{display_width, truncate_display};

/// Renderer runtime parameters.
#[derive(Debug, Clone, Default)]
pub struct RendererSettings {
    /// Where to park the cursor after a frame, 0-based `(row, column)`.
    pub restore_cursor: Option<(u16, u16)>,
}

/// Writes zones to a terminal handle using absolute cursor moves.
pub struct AnsiRenderer {
    settings: RendererSettings,
}

impl AnsiRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    pub fn render(&mut self, writer: &mut impl Write, dirty: &[(ZoneId, ZoneState)]) -> Result<()> {
        for (_id, state) in dirty {
            render_zone(writer, state)?;
        }

        if let Some((row, col)) = self.settings.restore_cursor {
            write!(writer, "{}", move_to(row + 1, col + 1))?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn render_zone(writer: &mut impl Write, state: &ZoneState) -> Result<()> {
    let Rect {
        x,
        y,
        width,
        height,
    } = state.rect;

    if state.rect.is_empty() {
        return Ok(());
    }

    let blank = String::new();
    for row in 0..height {
        let line = state.lines.get(row as usize).unwrap_or(&blank);
        write!(
            writer,
            "{}{}{}",
            move_to(y + row + 1, x + 1),
            fit_line(line, width),
            reset_style()
        )?;
    }

    Ok(())
}

/// Pad or cut `line` so it covers exactly `width` columns.
pub fn fit_line(line: &str, width: u16) -> String {
    let width = width as usize;
    let mut fitted = truncate_display(line, width);
    let display = display_width(&fitted);
    if display < width {
        fitted.push_str(&" ".repeat(width - display));
    }
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BODY_ZONE;
    use crate::registry::ZoneRegistry;
    use std::collections::HashMap;

    #[test]
    fn fit_line_pads_and_cuts() {
        assert_eq!(fit_line("hi", 4), "hi  ");
        assert_eq!(display_width(&fit_line("a long sentence", 6)), 6);
    }

    #[test]
    fn renderer_writes_cursor_sequences() {
        let mut registry = ZoneRegistry::new();
        registry.sync_layout(&HashMap::from([(BODY_ZONE, Rect::new(2, 3, 5, 2))]));
        registry.take_dirty();
        registry.apply_lines(BODY_ZONE, vec!["hi".into()]).unwrap();
        let dirty = registry.take_dirty();

        let mut output = Vec::new();
        let mut renderer = AnsiRenderer::with_default();
        renderer.settings_mut().restore_cursor = Some((0, 0));
        renderer.render(&mut output, &dirty).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("\u{1b}[4;3Hhi   "));
        assert!(rendered.contains("\u{1b}[5;3H     "));
        assert!(rendered.ends_with("\u{1b}[1;1H"));
    }
}
