//! HTTP client for the state/city directory service
//!
//! Every request carries the configured API key. Without a key the
//! directory reports itself as unconfigured instead of attempting a call
//! that would only come back 401.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use sn_core::config::{GeoConfig, HttpConfig};
use sn_core::geo::{sort_by_name, CityOption, StateOption};
use sn_core::ports::{GeoDirectoryError, GeoDirectoryPort};

const API_KEY_HEADER: &str = "X-CSCAPI-KEY";

pub struct HttpGeoDirectory {
    client: reqwest::Client,
    base_url: String,
    country: String,
    api_key: Option<String>,
}

impl HttpGeoDirectory {
    /// Create a directory client over an existing HTTP client.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        country: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            country: country.into(),
            api_key,
        }
    }

    /// Create a directory client from configuration.
    pub fn from_config(geo: &GeoConfig, http: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .context("failed to build geo directory HTTP client")?;

        Ok(Self::new(
            client,
            geo.base_url.clone(),
            geo.country.clone(),
            geo.api_key.clone(),
        ))
    }

    fn api_key(&self) -> Result<&str, GeoDirectoryError> {
        self.api_key
            .as_deref()
            .ok_or(GeoDirectoryError::Unconfigured)
    }

    async fn fetch_rows<T>(&self, url: String) -> Result<Vec<T>, GeoDirectoryError>
    where
        T: serde::de::DeserializeOwned,
    {
        let key = self.api_key()?;
        debug!(url = %url, "geo directory request");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, key)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoDirectoryError::Status {
                code: status.as_u16(),
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| GeoDirectoryError::Transport(format!("invalid directory response: {e}")))
    }
}

#[async_trait]
impl GeoDirectoryPort for HttpGeoDirectory {
    async fn load_states(&self) -> Result<Vec<StateOption>, GeoDirectoryError> {
        let url = format!("{}/countries/{}/states", self.base_url, self.country);
        let rows: Vec<StateRow> = self.fetch_rows(url).await?;

        let mut states: Vec<StateOption> = rows
            .into_iter()
            .map(|row| StateOption {
                code: row.iso2,
                name: row.name,
            })
            .collect();
        sort_by_name(&mut states);
        Ok(states)
    }

    async fn load_cities(&self, state_code: &str) -> Result<Vec<CityOption>, GeoDirectoryError> {
        let url = format!(
            "{}/countries/{}/states/{}/cities",
            self.base_url, self.country, state_code
        );
        let rows: Vec<CityRow> = self.fetch_rows(url).await?;

        let mut cities: Vec<CityOption> = rows
            .into_iter()
            .map(|row| CityOption {
                id: row.id,
                name: row.name,
            })
            .collect();
        sort_by_name(&mut cities);
        Ok(cities)
    }
}

/// Directory row for a state; the service sends more columns than these,
/// unknown fields are ignored.
#[derive(Deserialize)]
struct StateRow {
    iso2: String,
    name: String,
}

#[derive(Deserialize)]
struct CityRow {
    id: i64,
    name: String,
}

fn transport_error(error: reqwest::Error) -> GeoDirectoryError {
    if error.is_timeout() {
        GeoDirectoryError::Transport("request timed out".to_string())
    } else {
        GeoDirectoryError::Transport(error.to_string())
    }
}
