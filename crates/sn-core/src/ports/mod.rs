//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port here, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it here. Otherwise, place it in
//! the relevant domain submodule.

pub mod completion_prompt;
pub mod geo;
pub mod localizer;
pub mod registry;
pub mod session;
pub mod wizard_events;

pub use completion_prompt::CompletionPromptPort;
pub use geo::{GeoDirectoryError, GeoDirectoryPort};
pub use localizer::LocalizerPort;
pub use registry::{RegistrationError, RegistrationGatewayPort};
pub use session::{AuthError, SessionPort, TokenStorePort};
pub use wizard_events::WizardEventPort;
