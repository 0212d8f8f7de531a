//! Registration gateway port
//!
//! Contract for the membership registry's registration endpoint. The
//! gateway receives an assembled multipart payload and answers with a
//! session token, or with a failure the wizard can replay to the member.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::session::SessionToken;
use crate::submission::RegistrationPayload;

#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The registry processed the submission and said no. Field messages
    /// are keyed the same way the local validators key them.
    #[error("registration rejected")]
    Rejected {
        message: Option<String>,
        field_errors: BTreeMap<String, String>,
    },

    /// Transport-level failure; the submission may not have reached the
    /// registry at all.
    #[error("registry unreachable: {reason}")]
    Unreachable { reason: String },
}

#[async_trait]
pub trait RegistrationGatewayPort: Send + Sync {
    async fn register(
        &self,
        payload: RegistrationPayload,
    ) -> Result<SessionToken, RegistrationError>;
}
