//! Wizard control state.

use serde::{Deserialize, Serialize};

use crate::geo::GeoCache;
use crate::orgs::OrgOption;
use crate::registration::FieldErrors;
use crate::session::SessionToken;
use crate::wizard::step::WizardStep;

/// Where the wizard session is in its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WizardPhase {
    /// The member is filling in the form.
    Editing,
    /// A submission is in flight; inputs and navigation are locked.
    Submitting,
    /// Registration went through; the draft is spent.
    Completed { token: SessionToken },
}

/// Top-level submission failure banner, dismissable by the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormError {
    /// The registry rejected the submission.
    Rejected { message: Option<String> },
    /// The registry could not be reached.
    Unreachable,
}

impl FormError {
    /// Catalog key for the banner text. `Rejected` carries the server's own
    /// message, shown verbatim when present.
    pub fn message_key(&self) -> &'static str {
        match self {
            FormError::Rejected { .. } => "wizard.submit.rejected",
            FormError::Unreachable => "wizard.submit.unreachable",
        }
    }
}

/// Transient control state owned by the wizard machine.
///
/// The registration draft itself lives next to this, not inside it; the
/// machine reads the draft but only the executor mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    /// Cleared and recomputed wholesale on every validation pass.
    pub field_errors: FieldErrors,
    pub form_error: Option<FormError>,
    pub phase: WizardPhase,
    pub geo: GeoCache,
    /// Organisation options derived from the selected department.
    pub org_options: Vec<OrgOption>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::FIRST,
            field_errors: FieldErrors::new(),
            form_error: None,
            phase: WizardPhase::Editing,
            geo: GeoCache::default(),
            org_options: Vec::new(),
        }
    }
}

impl WizardState {
    pub fn is_editing(&self) -> bool {
        matches!(self.phase, WizardPhase::Editing)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, WizardPhase::Submitting)
    }

    pub fn completed_token(&self) -> Option<&SessionToken> {
        match &self.phase {
            WizardPhase::Completed { token } => Some(token),
            _ => None,
        }
    }
}
