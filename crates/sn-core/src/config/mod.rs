//! Configuration domain models

mod app_config;

pub use app_config::{AppConfig, GeoConfig, HttpConfig, LocaleConfig, RegistryConfig};
