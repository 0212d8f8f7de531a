//! Logging adapter for the wizard event port.
//!
//! A headless embedding has no surface to push wizard state to, so the
//! default wiring logs each transition instead. A shell that renders the
//! wizard replaces this with its own emitter at wiring time.

use anyhow::Result;
use async_trait::async_trait;

use sn_core::ports::WizardEventPort;
use sn_core::wizard::WizardState;

/// Logs wizard state changes using `tracing`. Does not push to a surface.
pub struct LoggingWizardEventEmitter;

#[async_trait]
impl WizardEventPort for LoggingWizardEventEmitter {
    async fn wizard_state_changed(&self, state: &WizardState) -> Result<()> {
        tracing::info!(step = ?state.step, phase = ?state.phase, "Wizard state changed");
        Ok(())
    }
}
