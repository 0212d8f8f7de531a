use std::sync::Arc;

use anyhow::Context;

use sn_core::ports::{SessionPort, TokenStorePort};
use sn_core::session::MemberRole;

use super::LandingRoute;

/// Use case for resolving the post-registration landing page.
///
/// Looks up the stored session token, resolves it to the member profile
/// and maps the assigned role to a landing route.
pub struct ResolveLanding {
    sessions: Arc<dyn SessionPort>,
    token_store: Arc<dyn TokenStorePort>,
}

impl ResolveLanding {
    /// Create a new ResolveLanding use case from trait objects.
    pub fn new(sessions: Arc<dyn SessionPort>, token_store: Arc<dyn TokenStorePort>) -> Self {
        Self {
            sessions,
            token_store,
        }
    }

    /// Create a new ResolveLanding use case from cloned Arc<dyn Port>
    /// references.
    pub fn from_ports(
        sessions: Arc<dyn SessionPort>,
        token_store: Arc<dyn TokenStorePort>,
    ) -> Self {
        Self::new(sessions, token_store)
    }

    /// Resolve the landing route for the stored session.
    pub async fn execute(&self) -> anyhow::Result<LandingRoute> {
        let token = self
            .token_store
            .get()
            .await?
            .context("no session token stored")?;
        let user = self
            .sessions
            .current_user(&token)
            .await
            .context("failed to resolve the member profile")?;

        Ok(match user.role {
            MemberRole::Admin => LandingRoute::AdminConsole,
            MemberRole::Member => LandingRoute::MemberDashboard,
        })
    }
}
