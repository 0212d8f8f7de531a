//! Membership registry adapters

mod http_gateway;

pub use http_gateway::HttpRegistrationGateway;
