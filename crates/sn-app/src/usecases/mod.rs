//! Business logic use cases
//!
//! The wizard orchestrator owns the enrolment flow; the smaller use cases
//! around it cover what happens after a successful registration: resolving
//! the landing page and the one-time profile-completion prompt.

pub mod completion_prompt;
pub mod landing;
pub mod wizard;
