//! # sn-core
//!
//! Core domain models and business logic for the Sahayog Nidhi membership
//! client.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the registration draft, the enrolment wizard state
//! machine, field validation, dependent option derivation and the
//! submission assembler, plus the port contracts the application layer is
//! wired against.

// Public module exports
pub mod config;
pub mod geo;
pub mod orgs;
pub mod ports;
pub mod prompt;
pub mod registration;
pub mod session;
pub mod submission;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use geo::{CityOption, GeoCache, GeoResource, StateOption};
pub use prompt::CompletionPromptState;
pub use registration::{
    DraftEdit, MembershipKind, NomineeDraft, NomineeId, NomineeRoster, RegistrationDraft,
};
pub use session::{AuthSession, CurrentUser, MemberRole, SessionToken};
pub use wizard::{WizardAction, WizardEvent, WizardMachine, WizardState, WizardStep};
