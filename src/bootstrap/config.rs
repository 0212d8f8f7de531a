//! Configuration loader.
//!
//! Pure data loading: read the TOML file, parse it into [`AppConfig`],
//! fold in the environment overrides. No validation happens here. Empty
//! strings and odd values are facts; the adapters decide what to do with
//! them.

use anyhow::Context;
use std::path::{Path, PathBuf};

use sn_core::config::AppConfig;

/// Environment variables recognized on top of the config file.
///
/// Each one overrides a single field, so a deployment can keep secrets
/// like the directory API key out of the file entirely.
const ENV_GEO_API_KEY: &str = "SN_GEO_API_KEY";
const ENV_GEO_BASE_URL: &str = "SN_GEO_BASE_URL";
const ENV_REGISTRY_BASE_URL: &str = "SN_REGISTRY_BASE_URL";
const ENV_LOCALE_LANGUAGE: &str = "SN_LOCALE_LANGUAGE";
const ENV_DATA_DIR: &str = "SN_DATA_DIR";

/// Load configuration from a TOML file plus environment overrides.
///
/// With `None` the file step is skipped and the defaults apply. A `.env`
/// file in the working directory is honoured when present, which keeps
/// local development out of the shell profile.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
/// A missing file passed explicitly is an error; only `None` means
/// "run on defaults".
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = match config_path {
        Some(path) => read_config_file(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_config_file(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content).context("Failed to parse config as TOML")
}

fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides(config, |name| std::env::var(name).ok());
}

/// Fold overrides from a variable source into the config.
///
/// Split out from [`apply_env_overrides`] so tests can pass a closure
/// instead of mutating the process environment.
fn apply_overrides(config: &mut AppConfig, get: impl Fn(&str) -> Option<String>) {
    if let Some(api_key) = get(ENV_GEO_API_KEY) {
        config.geo.api_key = Some(api_key);
    }
    if let Some(base_url) = get(ENV_GEO_BASE_URL) {
        config.geo.base_url = base_url;
    }
    if let Some(base_url) = get(ENV_REGISTRY_BASE_URL) {
        config.registry.base_url = base_url;
    }
    if let Some(language) = get(ENV_LOCALE_LANGUAGE) {
        config.locale.language = language;
    }
    if let Some(data_dir) = get(ENV_DATA_DIR) {
        config.data_dir = Some(PathBuf::from(data_dir));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_config(toml_content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_read_config_reads_valid_toml() {
        let toml_content = r#"
            data_dir = "/var/lib/sahayog-nidhi"

            [geo]
            base_url = "https://geo.example/v1"
            country = "IN"
            api_key = "cscapi-test-key"

            [registry]
            base_url = "https://sn.example/api"

            [locale]
            catalog_path = "/etc/sahayog-nidhi/messages.json"
            language = "hi"

            [http]
            timeout_secs = 10
        "#;
        let temp_file = write_temp_config(toml_content);

        let config = read_config_file(temp_file.path()).unwrap();

        assert_eq!(config.geo.base_url, "https://geo.example/v1");
        assert_eq!(config.geo.api_key.as_deref(), Some("cscapi-test-key"));
        assert_eq!(config.registry.base_url, "https://sn.example/api");
        assert_eq!(config.locale.language, "hi");
        assert_eq!(
            config.locale.catalog_path,
            Some(PathBuf::from("/etc/sahayog-nidhi/messages.json"))
        );
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/sahayog-nidhi")));
    }

    #[test]
    fn test_read_config_fills_missing_sections_with_defaults() {
        let toml_content = r#"
            [registry]
            base_url = "https://sn.example/api"
        "#;
        let temp_file = write_temp_config(toml_content);

        let config = read_config_file(temp_file.path()).unwrap();

        assert_eq!(config.registry.base_url, "https://sn.example/api");
        assert_eq!(config.geo.country, "IN");
        assert_eq!(config.geo.api_key, None);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_read_config_does_not_validate_values() {
        // A zero timeout and an empty URL are accepted as facts.
        let toml_content = r#"
            [registry]
            base_url = ""

            [http]
            timeout_secs = 0
        "#;
        let temp_file = write_temp_config(toml_content);

        let config = read_config_file(temp_file.path()).unwrap();

        assert_eq!(config.registry.base_url, "");
        assert_eq!(config.http.timeout_secs, 0);
    }

    #[test]
    fn test_read_config_returns_io_error_on_file_not_found() {
        let non_existent_path = Path::new("/this/path/does/not/exist/config.toml");

        let result = read_config_file(non_existent_path);

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read config file"), "got: {err_msg}");
    }

    #[test]
    fn test_read_config_rejects_malformed_toml() {
        let temp_file = write_temp_config("registry = not toml at all [");

        let result = read_config_file(temp_file.path());

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_overrides_replace_individual_fields() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_GEO_API_KEY, "key-from-env"),
            (ENV_REGISTRY_BASE_URL, "https://staging.example/api"),
            (ENV_DATA_DIR, "/tmp/sn-data"),
        ]);
        let mut config = AppConfig::default();

        apply_overrides(&mut config, |name| {
            vars.get(name).map(|value| value.to_string())
        });

        assert_eq!(config.geo.api_key.as_deref(), Some("key-from-env"));
        assert_eq!(config.registry.base_url, "https://staging.example/api");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/sn-data")));
        // Untouched fields keep their values.
        assert_eq!(config.geo.base_url, "https://api.countrystatecity.in/v1");
        assert_eq!(config.locale.language, "en");
    }

    #[test]
    fn test_overrides_are_a_no_op_without_variables() {
        let mut config = AppConfig::default();

        apply_overrides(&mut config, |_| None);

        assert_eq!(config.geo.api_key, None);
        assert_eq!(config.registry.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_overrides_win_over_the_file() {
        let toml_content = r#"
            [locale]
            language = "en"
        "#;
        let temp_file = write_temp_config(toml_content);
        let mut config = read_config_file(temp_file.path()).unwrap();

        apply_overrides(&mut config, |name| {
            (name == ENV_LOCALE_LANGUAGE).then(|| "hi".to_string())
        });

        assert_eq!(config.locale.language, "hi");
    }
}
