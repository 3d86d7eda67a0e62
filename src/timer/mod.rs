//! One-shot timers on a virtual clock.
//!
//! The runtime advances the clock with each tick, so the bootstrap delay, the
//! simulated contact submission and the notice auto-dismiss all fire from the
//! same loop that handles input, and tests can drive time explicitly.

mod core;

pub use self::core::{FiredTimer, MountId, TimerError, TimerHandle, TimerKey, TimerOwner, TimerQueue};
