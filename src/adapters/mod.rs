//! Composition-root adapters.
//!
//! Port implementations that belong to the embedding layer rather than
//! to `sn-infra`: they exist to give the headless runtime a working
//! default where a real surface would plug in its own.

pub mod events;

pub use events::LoggingWizardEventEmitter;
