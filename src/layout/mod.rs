//! Column layout for the shell frame.
//!
//! The frame is header, body and footer stacked vertically. Sizes come from
//! the chrome (header and footer are as tall as their content) and the body
//! takes whatever rows are left.

mod core;

pub use self::core::{BODY_ZONE, Constraint, FOOTER_ZONE, FrameLayout, HEADER_ZONE, SCREEN_ZONE, ZoneId, split_column};
