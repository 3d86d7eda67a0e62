//! Terminal escape helpers for composing ANSI and OSC sequences.
//!
//! All functions return owned `String`s so callers can extend them or write
//! directly to stdout.

const CSI: &str = "\x1b[";
const OSC: &str = "\x1b]";
const BEL: &str = "\x07";

/// Move the cursor to an absolute 1-based `row` and `column`.
pub fn move_to(row: u16, column: u16) -> String {
    format!("{CSI}{row};{column}H")
}

/// Reset all text attributes.
pub fn reset_style() -> String {
    format!("{CSI}0m")
}

/// Wrap `label` in an OSC 8 hyperlink to `url`. Terminals that support it
/// open the link in the browser; others just show the label.
pub fn hyperlink(url: &str, label: &str) -> String {
    format!("{OSC}8;;{url}{BEL}{label}{OSC}8;;{BEL}")
}
