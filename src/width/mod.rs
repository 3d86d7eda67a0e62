//! Terminal display width helpers.
//!
//! Page content carries ANSI styling and OSC 8 hyperlinks, so every width
//! calculation strips escapes before measuring.

mod utils;

pub use utils::{display_width, truncate_display, wrap_to_width};
