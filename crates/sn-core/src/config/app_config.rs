//! Application configuration domain model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration
///
/// Loaded by the runtime layer from files and environment variables and
/// handed down to the adapters. Every section has working defaults so a
/// bare install can start without any configuration present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Geographic directory service settings
    pub geo: GeoConfig,

    /// Membership registry settings
    pub registry: RegistryConfig,

    /// Localisation settings
    pub locale: LocaleConfig,

    /// HTTP client settings shared by all remote adapters
    pub http: HttpConfig,

    /// Override for the application data directory
    pub data_dir: Option<PathBuf>,
}

/// Geographic directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Base URL of the directory service
    pub base_url: String,

    /// ISO country code whose states and cities are listed
    pub country: String,

    /// API key for the directory service; without one the directory is
    /// reported as unavailable instead of attempted
    pub api_key: Option<String>,
}

/// Membership registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the registry API
    pub base_url: String,
}

/// Localisation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Path to a message catalog file; when absent, built-in fallbacks are
    /// used for every key
    pub catalog_path: Option<PathBuf>,

    /// Language code selecting a section of the catalog
    pub language: String,
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            geo: GeoConfig::default(),
            registry: RegistryConfig::default(),
            locale: LocaleConfig::default(),
            http: HttpConfig::default(),
            data_dir: None,
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.countrystatecity.in/v1".to_string(),
            country: "IN".to_string(),
            api_key: None,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            language: "en".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}
