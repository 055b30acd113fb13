//! Water-quality portal client.
//!
//! Read-only queries against a Water Quality Portal-shaped REST API by
//! state, characteristic, and date range. Entirely independent of the
//! carbon-tip paths; the dashboard's water card is its only consumer.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Default portal base URL.
pub const DEFAULT_WATER_BASE_URL: &str = "https://www.waterqualitydata.us";

/// Per-request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Date format the portal expects for range bounds.
const PORTAL_DATE_FORMAT: &str = "%m-%d-%Y";

/// A water-quality query by state, characteristic, and date range.
#[derive(Debug, Clone, Deserialize)]
pub struct WaterQualityQuery {
    /// Two-letter state FIPS code, e.g. `06` for California.
    pub state_code: String,
    /// Characteristic name, e.g. `pH` or `Nitrate`.
    pub characteristic: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl WaterQualityQuery {
    /// Validate the query before issuing a request.
    pub fn validate(&self) -> Result<(), LookupError> {
        if self.state_code.trim().is_empty() {
            return Err(LookupError::Validation(
                "State code must not be empty".to_string(),
            ));
        }
        if self.characteristic.trim().is_empty() {
            return Err(LookupError::Validation(
                "Characteristic must not be empty".to_string(),
            ));
        }
        if self.start_date > self.end_date {
            return Err(LookupError::Validation(format!(
                "Start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}

/// One measurement row from the portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterQualityResult {
    pub monitoring_location: String,
    pub characteristic: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub activity_date: String,
}

#[derive(Debug, Deserialize)]
struct WaterQualityResponse {
    results: Vec<WaterQualityResult>,
}

/// HTTP client for the water-quality portal.
pub struct WaterQualityClient {
    client: reqwest::Client,
    base_url: String,
}

impl WaterQualityClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client from the `WATER_QUALITY_BASE_URL` environment
    /// variable, defaulting to the public portal.
    pub fn from_env() -> Self {
        let base_url = std::env::var("WATER_QUALITY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_WATER_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Run a measurement query against the portal.
    pub async fn query(
        &self,
        query: &WaterQualityQuery,
    ) -> Result<Vec<WaterQualityResult>, LookupError> {
        query.validate()?;

        let response = self
            .client
            .get(format!("{}/data/Result/search", self.base_url))
            .query(&[
                ("statecode", format!("US:{}", query.state_code.trim())),
                ("characteristicName", query.characteristic.trim().to_string()),
                (
                    "startDateLo",
                    query.start_date.format(PORTAL_DATE_FORMAT).to_string(),
                ),
                (
                    "startDateHi",
                    query.end_date.format(PORTAL_DATE_FORMAT).to_string(),
                ),
                ("mimeType", "json".to_string()),
            ])
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await?;

        let status = response.status();
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

        let parsed: WaterQualityResponse = response.json().await?;
        tracing::debug!(
            count = parsed.results.len(),
            state = %query.state_code,
            characteristic = %query.characteristic,
            "Water quality query returned"
        );
        Ok(parsed.results)
    }
}
