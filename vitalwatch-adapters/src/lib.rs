//! # vitalwatch-adapters
//!
//! HTTP clients for the two external collaborators of vitalwatch.
//!
//! ## Supported Endpoints
//!
//! - **Sensor** ([`sensor`]) - `GET {base}/sensor-data`, returning one
//!   [`SensorReading`] as JSON
//! - **Gemini** ([`gemini`]) - `POST` to a `generateContent` endpoint, returning
//!   a text analysis of the supplied prompt
//!
//! Both clients report failures as [`AdapterError`]; deciding what the user
//! sees on failure is left to the caller.
//!
//! ## Quick Start (sensor)
//!
//! ```rust,no_run
//! use vitalwatch_adapters::sensor::SensorClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SensorClient::builder()
//!         .endpoint("http://192.168.1.3:5000")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let reading = client.fetch().await?;
//!     println!("Heart rate: {:?}", reading.heart_rate);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod gemini;
pub mod sensor;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AdapterError;
pub use gemini::{Analysis, GeminiClient};
pub use sensor::SensorClient;

// Re-export types for convenience
pub use vitalwatch_types::{MetricValue, SensorReading};
