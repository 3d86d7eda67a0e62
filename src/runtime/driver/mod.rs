//! Terminal drivers for the runtime.

pub mod cli;
