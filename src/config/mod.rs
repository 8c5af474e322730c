//! Application configuration management.
//!
//! `HockeyConfig` replaces inline environment checks at each call site: the
//! run mode, window geometry, shortcut and platform policies are resolved
//! once in `run()` and threaded through constructors.

pub mod app;

pub use app::{ClosePolicy, HockeyConfig, RunMode};
