//! # sahayog-nidhi
//!
//! Headless client core for the Sahayog Nidhi membership platform.
//!
//! This crate is the composition root. It loads configuration, sets up
//! tracing and wires the workspace layers together:
//!
//! - **sn-core**: domain model, wizard state machine, port contracts
//! - **sn-app**: use cases and the wizard orchestrator
//! - **sn-infra**: HTTP and filesystem adapters behind the ports
//!
//! A surface (desktop shell, web bridge, test harness) embeds this crate,
//! initializes [`telemetry`], calls [`bootstrap::initialize`] and then
//! drives everything through [`AppRuntime::usecases`].
//!
//! ## Modules
//!
//! - **bootstrap**: config loading, dependency wiring, runtime assembly
//! - **adapters**: composition-root port implementations
//! - **telemetry**: tracing-subscriber setup

pub mod adapters;
pub mod bootstrap;
pub mod telemetry;

// Re-export commonly used types
pub use bootstrap::runtime::{AppRuntime, UseCases};
pub use bootstrap::wiring::{AppDeps, WiringError};
pub use bootstrap::{initialize, load_config};
