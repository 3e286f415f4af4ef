use std::time::Duration;

use {
    async_trait::async_trait,
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
};

/// Resolves coordinates to the first-level administrative area (state).
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// `Ok(None)` when the service has no state for the point.
    async fn state_for(&self, lat: f64, lon: f64) -> anyhow::Result<Option<String>>;
}

/// Google Geocoding API client.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

const STATE_COMPONENT: &str = "administrative_area_level_1";

impl GoogleGeocoder {
    pub fn new(base_url: &str, api_key: Secret<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl ReverseGeocoder for GoogleGeocoder {
    async fn state_for(&self, lat: f64, lon: f64) -> anyhow::Result<Option<String>> {
        let latlng = format!("{lat},{lon}");
        let resp = self
            .client
            .get(format!("{}/maps/api/geocode/json", self.base_url))
            .query(&[
                ("latlng", latlng.as_str()),
                ("key", self.api_key.expose_secret().as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("geocoding error {status}: {body}");
        }

        let body: GeocodeResponse = resp.json().await?;
        match body.status.as_str() {
            "OK" => Ok(body.results.into_iter().next().and_then(|r| {
                r.address_components
                    .into_iter()
                    .find(|c| c.types.iter().any(|t| t == STATE_COMPONENT))
                    .map(|c| c.long_name)
            })),
            "ZERO_RESULTS" => Ok(None),
            other => anyhow::bail!(
                "geocoding failed: {other}{}",
                body.error_message
                    .map(|m| format!(": {m}"))
                    .unwrap_or_default()
            ),
        }
    }
}

/// Geocoder used when no API key is configured: every state is unknown.
pub struct SkipGeocoding;

#[async_trait]
impl ReverseGeocoder for SkipGeocoding {
    async fn state_for(&self, _lat: f64, _lon: f64) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}
