//! Reading sources for the dashboard.
//!
//! A source hands readings to the UI loop without ever blocking it. The
//! usual source is [`HttpSource`], which polls the sensor endpoint on a
//! fixed schedule; [`FileSource`] and [`ChannelSource`] feed readings from a
//! local file or from embedding code.

mod channel;
mod file;
mod http;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;

use vitalwatch_types::SensorReading;

/// Trait for receiving sensor readings from various sources.
///
/// # Example
///
/// ```
/// use vitalwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("reading.json");
/// while let Some(reading) = source.poll() {
///     println!("Heart rate: {:?}", reading.heart_rate);
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Take the next reading, if one has arrived.
    ///
    /// Returns `Some(reading)` if new data is available, `None` otherwise.
    /// This method should be non-blocking. A failed fetch is reported as
    /// the error sentinel reading, not as `None`.
    fn poll(&mut self) -> Option<SensorReading>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// The error of the most recent fetch, if it failed.
    fn error(&self) -> Option<String>;

    /// Number of fetches currently on the wire.
    fn in_flight(&self) -> usize {
        0
    }

    /// Ask for an extra fetch outside the regular schedule.
    fn poll_now(&mut self) {}
}
