//! Sahayog Nidhi application orchestration layer
//!
//! This crate contains the business logic use cases and the wizard runtime
//! orchestration. It depends on `sn-core` for the domain model and talks to
//! the outside world exclusively through the port traits defined there.

pub mod usecases;

pub use usecases::wizard::{WizardOrchestrator, WizardSnapshot};
