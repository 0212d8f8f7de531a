//! Landing resolution use cases
//!
//! A fresh session lands either on the admin console or on the member
//! dashboard, depending on the role the registry assigned to the member.

pub mod resolve_landing;

pub use resolve_landing::ResolveLanding;

/// Destination a fresh session is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingRoute {
    AdminConsole,
    MemberDashboard,
}
