//! Wizard steps.

use serde::{Deserialize, Serialize};

/// The four ordered steps of the enrolment wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Membership kind, state, identifier and password.
    Account,
    /// Name, birth date, contact details and identity documents.
    Personal,
    /// Employment or retirement record plus bank details.
    Service,
    /// Nominee roster, and the step submission happens from.
    Nominees,
}

impl WizardStep {
    pub const COUNT: usize = 4;
    pub const FIRST: WizardStep = WizardStep::Account;
    pub const LAST: WizardStep = WizardStep::Nominees;

    pub fn index(self) -> usize {
        match self {
            WizardStep::Account => 0,
            WizardStep::Personal => 1,
            WizardStep::Service => 2,
            WizardStep::Nominees => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(WizardStep::Account),
            1 => Some(WizardStep::Personal),
            2 => Some(WizardStep::Service),
            3 => Some(WizardStep::Nominees),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Catalog key for the step title shown in the step indicator.
    pub fn title_key(self) -> &'static str {
        match self {
            WizardStep::Account => "wizard.step.account",
            WizardStep::Personal => "wizard.step.personal",
            WizardStep::Service => "wizard.step.service",
            WizardStep::Nominees => "wizard.step.nominees",
        }
    }
}
