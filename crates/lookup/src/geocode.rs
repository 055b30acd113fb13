//! Postcode geocoding client.
//!
//! Resolves a free-text postcode to a city, country, and coordinates
//! via a postcodes.io-shaped REST API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Default geocoding base URL.
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://api.postcodes.io";

/// Per-request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// A resolved location.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub postcode: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct PostcodeResponse {
    result: PostcodeResult,
}

#[derive(Debug, Deserialize)]
struct PostcodeResult {
    postcode: String,
    admin_district: Option<String>,
    country: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// HTTP client for the geocoding service.
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client from the `GEOCODE_BASE_URL` environment variable,
    /// defaulting to the public postcodes.io instance.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GEOCODE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEOCODE_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Resolve a postcode to a location.
    ///
    /// An unknown postcode maps to [`LookupError::NotFound`]; a row
    /// without coordinates maps to
    /// [`LookupError::MalformedResponse`].
    pub async fn lookup(&self, postcode: &str) -> Result<Location, LookupError> {
        let trimmed = postcode.trim();
        if trimmed.is_empty() {
            return Err(LookupError::Validation(
                "Postcode must not be empty".to_string(),
            ));
        }

        let url = format!(
            "{}/postcodes/{}",
            self.base_url,
            trimmed.replace(' ', "%20")
        );

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(LookupError::NotFound(format!(
                "Postcode '{trimmed}' is not recognized"
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PostcodeResponse = response.json().await?;
        let result = parsed.result;

        let (latitude, longitude) = match (result.latitude, result.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(LookupError::MalformedResponse(format!(
                    "Postcode '{}' has no coordinates",
                    result.postcode
                )))
            }
        };

        Ok(Location {
            postcode: result.postcode,
            city: result.admin_district.unwrap_or_else(|| "Unknown".to_string()),
            country: result.country,
            latitude,
            longitude,
        })
    }
}
