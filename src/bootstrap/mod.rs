//! Bootstrap sequence for the client runtime.
//!
//! `load_config()` → `wire_dependencies()` → `AppRuntime::new()`.
//!
//! Each phase is a pure function of the previous one: configuration is
//! loaded before any adapter exists, adapters are built before any use
//! case runs. Tracing is initialized separately by the embedding shell
//! (see [`crate::telemetry`]) so that config loading itself is logged
//! only when the shell wants it.

use std::path::Path;

pub mod config;
pub mod runtime;
pub mod wiring;

pub use config::load_config;
pub use runtime::{AppRuntime, UseCases};
pub use wiring::{wire_dependencies, AppDeps};

/// Bring up the full runtime: configuration, adapters, use cases.
///
/// Pass `None` to run on defaults and environment overrides alone.
/// Surfaces that push wizard state to a UI wire their own event port via
/// [`wiring::wire_dependencies_with_events`] and call [`AppRuntime::new`]
/// themselves.
pub fn initialize(config_path: Option<&Path>) -> anyhow::Result<AppRuntime> {
    let config = load_config(config_path)?;
    let deps = wire_dependencies(&config)?;
    Ok(AppRuntime::new(deps))
}
