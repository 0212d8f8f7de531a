//! Events that drive the enrolment wizard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::{CityOption, StateOption};
use crate::session::SessionToken;

/// One input to the wizard machine: member intents and async completions
/// share the same event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// Validate the current step and advance when clean.
    Next,
    /// Step back without validating.
    Back,
    /// Jump straight to a step indicator. Any in-range index is honored.
    JumpTo { index: usize },

    /// Kick off the state directory load.
    StatesRequested,
    /// State directory results arrived.
    StatesLoaded { states: Vec<StateOption> },
    /// The member picked a state.
    StateChanged { code: String },
    /// City results arrived for `state_code`. Dropped when the member has
    /// moved on to a different state in the meantime.
    CitiesLoaded {
        state_code: String,
        cities: Vec<CityOption>,
    },
    /// A directory lookup failed or the directory is unconfigured.
    GeoUnavailable { scope: GeoScope },

    /// The member picked a department.
    DepartmentChanged { department: String },

    /// Validate the final step and submit.
    Submit,
    /// The registry accepted the submission.
    SubmissionSucceeded { token: SessionToken },
    /// The registry rejected the submission or was unreachable.
    SubmissionFailed { failure: SubmitFailure },
    /// The member dismissed the submission failure banner.
    DismissFormError,
}

/// Which directory lookup a [`WizardEvent::GeoUnavailable`] refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoScope {
    States,
    Cities { state_code: String },
}

/// Why a submission attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitFailure {
    /// Structured rejection: an optional top-level message plus per-field
    /// messages keyed like the local validators key them.
    Rejected {
        message: Option<String>,
        field_errors: BTreeMap<String, String>,
    },
    /// Transport-level failure, nothing reached the registry.
    Unreachable,
}
