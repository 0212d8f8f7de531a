//! Geographic directory port
//!
//! Contract for the external state/city directory. Implementations sort
//! results alphabetically by name before returning them; callers rely on
//! that order when rendering selectors.

use async_trait::async_trait;
use thiserror::Error;

use crate::geo::{CityOption, StateOption};

#[derive(Debug, Error)]
pub enum GeoDirectoryError {
    /// No API credential is configured. A precondition failure, not a
    /// transient one; the wizard renders the selector as unavailable
    /// without retrying.
    #[error("geo directory credential not configured")]
    Unconfigured,

    #[error("geo directory unreachable: {0}")]
    Transport(String),

    #[error("geo directory returned status {code}")]
    Status { code: u16 },
}

#[async_trait]
pub trait GeoDirectoryPort: Send + Sync {
    /// All states of the configured country, sorted by name.
    async fn load_states(&self) -> Result<Vec<StateOption>, GeoDirectoryError>;

    /// Cities of one state, sorted by name. An empty list is a valid
    /// answer, distinct from any error.
    async fn load_cities(&self, state_code: &str) -> Result<Vec<CityOption>, GeoDirectoryError>;
}
