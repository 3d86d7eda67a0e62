//! Path → page resolution.
//!
//! Routes are an ordered table over the closed [`PageId`] set. Exact patterns
//! are tried in declaration order and a single trailing wildcard catches every
//! other path, so resolution is total and never fails at runtime.

mod core;
mod location;

pub use self::core::{PageId, Route, RouteError, RoutePattern, RouteTable};
pub use location::location_from_hash;
