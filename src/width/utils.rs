use unicode_width::UnicodeWidthChar;

fn strip_escapes(text: &str) -> String {
    let clean = strip_ansi_escapes::strip(text);
    String::from_utf8_lossy(&clean).into_owned()
}

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(strip_escapes(text).as_str())
}

/// Shorten `text` to at most `max_width` columns, marking the cut with `…`.
///
/// Styling is dropped when the text has to be cut.
pub fn truncate_display(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }

    let mut result = String::new();
    let mut width = 0usize;
    for ch in strip_escapes(text).chars() {
        let w = ch.width().unwrap_or(0);
        if width + w >= max_width {
            if width < max_width {
                result.push('…');
            }
            break;
        }
        width += w;
        result.push(ch);
    }
    result
}

const LINK_MARK: &str = "\x1b]8;;";

/// Split on spaces, keeping each OSC 8 hyperlink whole so a line break never
/// lands between its opener and closer.
fn words(body: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0usize;
    let mut in_link = false;
    let mut index = 0usize;
    while index < body.len() {
        let rest = &body[index..];
        if rest.starts_with(LINK_MARK) {
            let Some(bel) = rest.find('\x07') else {
                break;
            };
            in_link = bel > LINK_MARK.len();
            index += bel + 1;
            continue;
        }
        if rest.starts_with(' ') && !in_link {
            if index > start {
                words.push(&body[start..index]);
            }
            start = index + 1;
        }
        index += rest.chars().next().map_or(1, char::len_utf8);
    }
    if body.len() > start {
        words.push(&body[start..]);
    }
    words
}

/// Word-wrap `content` to `width` columns.
///
/// Leading indentation of each source line is repeated on its continuation
/// lines. Words are measured without their escapes; a single word wider than
/// the line is split on characters and loses its styling. Hyperlinks wrap as
/// one word.
pub fn wrap_to_width(content: &str, width: u16) -> Vec<String> {
    let width = width as usize;
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for raw in content.split('\n') {
        let body = raw.trim_start_matches(' ');
        if body.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let indent = (raw.len() - body.len()).min(width.saturating_sub(1));
        let pad = " ".repeat(indent);
        let mut current = pad.clone();
        let mut current_width = indent;

        for word in words(body) {
            let word_width = display_width(word);
            let separator = usize::from(current_width > indent);
            if current_width + separator + word_width <= width {
                if separator == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += separator + word_width;
                continue;
            }

            if current_width > indent {
                lines.push(std::mem::replace(&mut current, pad.clone()));
                current_width = indent;
            }

            if indent + word_width <= width {
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            for ch in strip_escapes(word).chars() {
                let w = ch.width().unwrap_or(0);
                if current_width + w > width && current_width > indent {
                    lines.push(std::mem::replace(&mut current, pad.clone()));
                    current_width = indent;
                }
                current.push(ch);
                current_width += w;
            }
        }

        if current_width > indent {
            lines.push(current);
        }
    }

    lines
}
