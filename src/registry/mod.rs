//! Zone registry tracking what each frame band last showed.

mod core;

pub use self::core::{ZoneRegistry, ZoneState};
