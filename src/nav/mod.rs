//! Navigation state owned by the shell: the current path and whether the
//! collapsible header menu is expanded.

mod core;

pub use self::core::{NAV_LINKS, NavLink, Navigation, NavigationState};
