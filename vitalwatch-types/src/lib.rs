//! # vitalwatch-types
//!
//! Core types for vital-sign monitoring. This crate defines the reading
//! schema produced by the sensor endpoint and the normal-range table used to
//! classify it.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to decode sensor JSON
//! - **Lenient values**: A field may be a number, a string, or absent, exactly as
//!   the sensor (or the error sentinel) sends it
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON serialization via serde, using the sensor's camelCase field names
//!
//! ## Example
//!
//! ```rust
//! use vitalwatch_types::{Metric, MetricValue, NormalRanges, SensorReading};
//!
//! let reading = SensorReading::new("120/80", 98.0, 70.0, 90.0);
//! assert_eq!(reading.get(Metric::HeartRate), Some(&MetricValue::Number(70.0)));
//!
//! let ranges = NormalRanges::default();
//! assert!(ranges.heart_rate.contains(70.0));
//! assert!(!ranges.heart_rate.contains(150.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod range;
mod reading;

pub use range::*;
pub use reading::*;

/// Literal carried in every field of the reading substituted for a failed fetch.
pub const ERROR_SENTINEL: &str = "Error";
