//! Side-effects produced by wizard transitions.

use serde::{Deserialize, Serialize};

/// Work the application layer performs after a transition. The machine
/// never does any of this itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    /// Fetch the state directory.
    LoadStates,
    /// Fetch cities for the given state.
    LoadCities { state_code: String },
    /// Clear the district chosen under the previous state.
    ClearDistrict,
    /// Clear the organisation chosen under the previous department.
    ClearOrganisation,
    /// Assemble the draft into a payload and send it to the registry.
    AssembleAndSubmit,
    /// Drop the accumulated draft once the registry has accepted it.
    DiscardDraft,
}
