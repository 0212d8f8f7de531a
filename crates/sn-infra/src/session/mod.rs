//! Session adapters: HTTP auth gateway and the client-local token store

mod http_auth;
mod token_store;

pub use http_auth::HttpAuthGateway;
pub use token_store::MemoryTokenStore;
