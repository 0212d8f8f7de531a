//! Dependency wiring.
//!
//! Builds the concrete adapters from [`AppConfig`] and bundles them as
//! the port trait objects the application layer consumes. Assembly only:
//! no business logic, no configuration validation. This is the only
//! module that names `sn-infra` types next to `sn-app` use cases.

use std::sync::Arc;

use sn_core::config::AppConfig;
use sn_core::ports::{
    CompletionPromptPort, GeoDirectoryPort, LocalizerPort, RegistrationGatewayPort, SessionPort,
    TokenStorePort, WizardEventPort,
};
use sn_infra::fs::resolve_data_dir;
use sn_infra::{
    FileCompletionPromptRepository, HttpAuthGateway, HttpGeoDirectory, HttpRegistrationGateway,
    JsonCatalog, MemoryTokenStore,
};

use crate::adapters::LoggingWizardEventEmitter;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Geo directory initialization failed: {0}")]
    GeoInit(String),

    #[error("Registry gateway initialization failed: {0}")]
    RegistryInit(String),

    #[error("Auth gateway initialization failed: {0}")]
    AuthInit(String),

    #[error("Message catalog initialization failed: {0}")]
    LocaleInit(String),

    #[error("Data directory resolution failed: {0}")]
    DataDirInit(String),
}

/// Port implementations the application layer is wired against.
///
/// Everything is shared as `Arc<dyn Port>` so the runtime can hand the
/// same adapter to several use cases.
pub struct AppDeps {
    pub geo: Arc<dyn GeoDirectoryPort>,
    pub registry: Arc<dyn RegistrationGatewayPort>,
    pub sessions: Arc<dyn SessionPort>,
    pub token_store: Arc<dyn TokenStorePort>,
    pub localizer: Arc<dyn LocalizerPort>,
    pub prompt_state: Arc<dyn CompletionPromptPort>,
    pub wizard_events: Arc<dyn WizardEventPort>,
}

/// Create all adapters from the configuration.
///
/// Wizard state changes go to [`LoggingWizardEventEmitter`]; a surface
/// that renders the wizard swaps in its own port through
/// [`wire_dependencies_with_events`].
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    wire_dependencies_with_events(config, Arc::new(LoggingWizardEventEmitter))
}

/// Create all adapters from the configuration with a caller-supplied
/// wizard event port.
pub fn wire_dependencies_with_events(
    config: &AppConfig,
    wizard_events: Arc<dyn WizardEventPort>,
) -> WiringResult<AppDeps> {
    let geo = HttpGeoDirectory::from_config(&config.geo, &config.http)
        .map_err(|e| WiringError::GeoInit(e.to_string()))?;
    let registry = HttpRegistrationGateway::from_config(&config.registry, &config.http)
        .map_err(|e| WiringError::RegistryInit(e.to_string()))?;
    let sessions = HttpAuthGateway::from_config(&config.registry, &config.http)
        .map_err(|e| WiringError::AuthInit(e.to_string()))?;
    let localizer = JsonCatalog::from_config(&config.locale)
        .map_err(|e| WiringError::LocaleInit(e.to_string()))?;
    let data_dir = resolve_data_dir(config.data_dir.as_deref())
        .map_err(|e| WiringError::DataDirInit(e.to_string()))?;
    let prompt_state = FileCompletionPromptRepository::with_defaults(data_dir);

    Ok(AppDeps {
        geo: Arc::new(geo),
        registry: Arc::new(registry),
        sessions: Arc::new(sessions),
        token_store: Arc::new(MemoryTokenStore::new()),
        localizer: Arc::new(localizer),
        prompt_state: Arc::new(prompt_state),
        wizard_events,
    })
}
