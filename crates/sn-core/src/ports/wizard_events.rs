//! Wizard event port
//!
//! The surface observes the wizard through this port: after every
//! transition the orchestrator pushes the fresh control state out.

use anyhow::Result;

use crate::wizard::WizardState;

#[async_trait::async_trait]
pub trait WizardEventPort: Send + Sync {
    async fn wizard_state_changed(&self, state: &WizardState) -> Result<()>;
}
