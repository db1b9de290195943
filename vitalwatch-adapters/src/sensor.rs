//! Sensor endpoint client.
//!
//! The sensor box exposes a single route, `GET /sensor-data`, answering with
//! the latest reading:
//!
//! ```json
//! { "bloodPressure": "120/80", "oxygenSaturation": 98, "heartRate": 70, "glucose": 90 }
//! ```
//!
//! Any non-2xx status is a failure; there is no authentication. A reply
//! without a text `bloodPressure` is rejected as a parse failure.

use std::time::Duration;

use reqwest::Client;

use vitalwatch_types::SensorReading;

use crate::AdapterError;

/// Default sensor base URL.
pub const DEFAULT_ENDPOINT: &str = "http://192.168.1.3:5000";

/// Route appended to the base URL.
const SENSOR_PATH: &str = "/sensor-data";

/// Client for the sensor endpoint.
#[derive(Debug, Clone)]
pub struct SensorClient {
    client: Client,
    endpoint: String,
}

impl SensorClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> SensorClientBuilder {
        SensorClientBuilder::default()
    }

    /// The configured base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full URL of the reading route.
    pub fn url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), SENSOR_PATH)
    }

    /// Fetch the latest reading.
    pub async fn fetch(&self) -> Result<SensorReading, AdapterError> {
        let response = self.client.get(self.url()).send().await?;

        if !response.status().is_success() {
            return Err(AdapterError::Status(response.status().as_u16()));
        }

        let reading: SensorReading = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;
        reading
            .check_shape()
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        Ok(reading)
    }
}

/// Builder for SensorClient.
#[derive(Debug, Default)]
pub struct SensorClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl SensorClientBuilder {
    /// Set the sensor base URL (e.g., "http://192.168.1.3:5000").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SensorClient, AdapterError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Client(e.to_string()))?;

        Ok(SensorClient {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}
