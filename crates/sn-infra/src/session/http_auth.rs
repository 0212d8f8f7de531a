//! HTTP auth gateway
//!
//! Login, profile resolution and logout against the registry's auth
//! endpoints. The wire user shape is camelCase and owned by this adapter;
//! the domain model stays untouched by it.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sn_core::config::{HttpConfig, RegistryConfig};
use sn_core::ports::{AuthError, SessionPort};
use sn_core::session::{AuthSession, CurrentUser, MemberRole, SessionToken};

pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    /// Create an auth gateway over an existing HTTP client.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create an auth gateway from configuration. Auth lives on the same
    /// backend as the registration endpoint, so it shares the registry
    /// base URL.
    pub fn from_config(registry: &RegistryConfig, http: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .context("failed to build auth HTTP client")?;

        Ok(Self::new(client, registry.base_url.clone()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl SessionPort for HttpAuthGateway {
    async fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, AuthError> {
        let url = self.endpoint("/auth/login");
        debug!(url = %url, "logging in");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                identifier,
                password,
            })
            .send()
            .await
            .map_err(unreachable_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Unreachable(format!(
                "auth endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body: LoginResponse = response.json().await.map_err(decode_error)?;
        Ok(AuthSession {
            token: SessionToken::new(body.token),
            user: body.user.into(),
        })
    }

    async fn current_user(&self, token: &SessionToken) -> Result<CurrentUser, AuthError> {
        let url = self.endpoint("/auth/me");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(unreachable_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::SessionExpired);
        }
        if !status.is_success() {
            return Err(AuthError::Unreachable(format!(
                "auth endpoint returned status {}",
                status.as_u16()
            )));
        }

        let user: UserWire = response.json().await.map_err(decode_error)?;
        Ok(user.into())
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), AuthError> {
        let url = self.endpoint("/auth/logout");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(unreachable_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::SessionExpired);
        }
        if !status.is_success() {
            return Err(AuthError::Unreachable(format!(
                "auth endpoint returned status {}",
                status.as_u16()
            )));
        }

        Ok(())
    }
}

fn unreachable_error(error: reqwest::Error) -> AuthError {
    if error.is_timeout() {
        AuthError::Unreachable("request timed out".to_string())
    } else {
        AuthError::Unreachable(error.to_string())
    }
}

fn decode_error(error: reqwest::Error) -> AuthError {
    AuthError::Unreachable(format!("invalid auth response: {error}"))
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: UserWire,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    member_id: String,
    full_name: String,
    role: MemberRole,
}

impl From<UserWire> for CurrentUser {
    fn from(wire: UserWire) -> Self {
        Self {
            member_id: wire.member_id,
            full_name: wire.full_name,
            role: wire.role,
        }
    }
}
