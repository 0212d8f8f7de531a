//! HTTP registration gateway
//!
//! Posts the assembled payload to the registry as one multipart request
//! and decodes the outcome: a session token on success, the registry's
//! structured validation response on rejection, a transport wrapper for
//! everything that never produced an answer.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use sn_core::config::{HttpConfig, RegistryConfig};
use sn_core::ports::{RegistrationError, RegistrationGatewayPort};
use sn_core::session::SessionToken;
use sn_core::submission::RegistrationPayload;

pub struct HttpRegistrationGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRegistrationGateway {
    /// Create a gateway over an existing HTTP client.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a gateway from configuration.
    pub fn from_config(registry: &RegistryConfig, http: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .context("failed to build registry HTTP client")?;

        Ok(Self::new(client, registry.base_url.clone()))
    }
}

#[async_trait]
impl RegistrationGatewayPort for HttpRegistrationGateway {
    async fn register(
        &self,
        payload: RegistrationPayload,
    ) -> Result<SessionToken, RegistrationError> {
        let url = format!("{}/auth/register", self.base_url);
        let form = build_form(payload)?;

        debug!(url = %url, "posting registration");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(unreachable_error)?;

        let status = response.status();
        if status.is_success() {
            let body: RegisterResponse =
                response
                    .json()
                    .await
                    .map_err(|e| RegistrationError::Unreachable {
                        reason: format!("invalid registry response: {e}"),
                    })?;
            return Ok(SessionToken::new(body.token));
        }

        if status.is_client_error() {
            // The registry answers rejections with a message plus
            // field-keyed errors; anything it sent that does not parse
            // degrades to a bare rejection.
            let rejection = response
                .json::<RejectionBody>()
                .await
                .unwrap_or_default();
            return Err(RegistrationError::Rejected {
                message: rejection.message,
                field_errors: rejection.errors,
            });
        }

        Err(RegistrationError::Unreachable {
            reason: format!("registry returned status {}", status.as_u16()),
        })
    }
}

fn build_form(payload: RegistrationPayload) -> Result<Form, RegistrationError> {
    let mut form = Form::new();

    for field in payload.fields {
        form = form.text(field.name, field.value);
    }

    for file in payload.files {
        let attachment = file.attachment;
        let part = Part::bytes(attachment.bytes)
            .file_name(attachment.file_name)
            .mime_str(&attachment.content_type)
            .map_err(|e| RegistrationError::Unreachable {
                reason: format!("invalid content type for part {}: {e}", file.name),
            })?;
        form = form.part(file.name, part);
    }

    Ok(form)
}

fn unreachable_error(error: reqwest::Error) -> RegistrationError {
    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else {
        error.to_string()
    };
    RegistrationError::Unreachable { reason }
}

#[derive(Deserialize)]
struct RegisterResponse {
    token: String,
}

#[derive(Default, Deserialize)]
struct RejectionBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, String>,
}
