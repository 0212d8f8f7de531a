//! Enrolment wizard module.
//!
//! The wizard is a pure state machine: [`WizardMachine::transition`] maps
//! the current state plus one event to the next state and a list of side
//! effects for the application layer to execute. Step indicators jump
//! anywhere; validation gates only forward movement and submission.

pub mod action;
pub mod event;
pub mod machine;
pub mod state;
pub mod step;

pub use action::WizardAction;
pub use event::{GeoScope, SubmitFailure, WizardEvent};
pub use machine::WizardMachine;
pub use state::{FormError, WizardPhase, WizardState};
pub use step::WizardStep;
