//! Registration wizard use cases.
//!
//! This module exposes the wizard orchestrator and its snapshot DTO.

mod context;
pub mod dto;
pub mod orchestrator;

pub use dto::{NomineeSlotView, WizardSnapshot};
pub use orchestrator::WizardOrchestrator;
