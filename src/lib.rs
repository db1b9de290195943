//! # vitalwatch
//!
//! A terminal dashboard and library for watching live vital-sign readings.
//!
//! vitalwatch polls a bedside sensor for blood pressure, oxygen saturation,
//! heart rate and glucose, shows the values, and tints a figure white while
//! every value is inside its normal range and red as soon as one is not. On
//! request the displayed values are sent to a generative-AI service and the
//! returned analysis is appended to a list.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (state) │    │(evaluate)│    │(render) │    │          │  │
//! │  └────┬────┘    └────┬─────┘    └─────────┘    └──────────┘  │
//! │       │              │ recolor                               │
//! │       │              ▼                                       │
//! │       │         ┌─────────┐                                  │
//! │       │         │  scene  │◀── ModelLoader                   │
//! │       │         └─────────┘                                  │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource      │
//! │  └─────────┘                                                 │
//! │  ┌─────────┐                                                 │
//! │  │ advisor │──▶ analysis service ──▶ RecommendationList      │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state and user interaction logic
//! - **[`source`]**: Reading sources ([`DataSource`] trait) for the sensor
//!   endpoint, a local file, and in-process channels
//! - **[`data`]**: Range evaluation, the displayed slots, history for
//!   sparklines, and the recommendation list
//! - **[`scene`]**: The displayed figure, its tint, and asynchronous loading
//! - **[`advisor`]**: Analysis requests built from the displayed values
//! - **[`config`]**: Layered settings (defaults, TOML file, environment)
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the default sensor every 5 seconds
//! vitalwatch
//!
//! # Another sensor, a custom figure, an API key from the environment
//! VITALWATCH_AI_API_KEY=... vitalwatch --sensor-url http://10.0.0.7:5000 --model figure.txt
//!
//! # One reading as JSON
//! vitalwatch --once
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use vitalwatch::{App, ChannelSource};
//! use vitalwatch_types::{NormalRanges, SensorReading};
//!
//! let (tx, source) = ChannelSource::create("bedside");
//! let mut app = App::new(Box::new(source), NormalRanges::default());
//!
//! tx.send(SensorReading::new("120/80", 98.0, 70.0, 90.0)).unwrap();
//! app.reload_data();
//! assert!(app.display.verdict().unwrap().is_normal());
//! ```
//!
//! ### Polling the sensor
//!
//! ```no_run
//! use std::time::Duration;
//! use vitalwatch::{App, HttpSource};
//! use vitalwatch_adapters::SensorClient;
//! use vitalwatch_types::NormalRanges;
//!
//! # tokio_test::block_on(async {
//! let client = SensorClient::builder()
//!     .endpoint("http://192.168.1.3:5000")
//!     .build()
//!     .unwrap();
//! let source = HttpSource::spawn(client, Duration::from_secs(5));
//! let app = App::new(Box::new(source), NormalRanges::default());
//! # });
//! ```

pub mod advisor;
pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod scene;
pub mod source;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use app::App;
pub use data::{assess, is_normal, Assessment, Display, DisplayContext, Verdict};
pub use scene::{SceneModel, Tint};
pub use source::{ChannelSource, DataSource, FileSource, HttpSource};
