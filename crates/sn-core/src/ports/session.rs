//! Session and token storage ports
//!
//! The wizard touches the session layer only after a successful
//! registration: the issued token is stored and the member profile is
//! resolved to pick the right landing page.

use async_trait::async_trait;
use thiserror::Error;

use crate::session::{AuthSession, CurrentUser, SessionToken};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session expired or revoked")]
    SessionExpired,

    #[error("auth service unreachable: {0}")]
    Unreachable(String),
}

#[async_trait]
pub trait SessionPort: Send + Sync {
    async fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn current_user(&self, token: &SessionToken) -> Result<CurrentUser, AuthError>;

    async fn logout(&self, token: &SessionToken) -> Result<(), AuthError>;
}

/// Client-local storage for the bearer token.
#[async_trait]
pub trait TokenStorePort: Send + Sync {
    async fn get(&self) -> anyhow::Result<Option<SessionToken>>;

    async fn set(&self, token: &SessionToken) -> anyhow::Result<()>;

    async fn clear(&self) -> anyhow::Result<()>;
}
