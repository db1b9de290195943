//! Channel-based data source.
//!
//! Receives readings via a tokio watch channel. Useful when the dashboard is
//! embedded and readings are pushed by the host program.

use tokio::sync::watch;

use vitalwatch_types::SensorReading;

use super::DataSource;

/// A data source that receives readings via a channel.
///
/// Only values sent after the source was created are delivered; the value
/// the channel was created with is treated as "nothing yet".
///
/// # Example
///
/// ```
/// use vitalwatch::{ChannelSource, DataSource};
/// use vitalwatch_types::SensorReading;
///
/// let (tx, mut source) = ChannelSource::create("bedside");
/// tx.send(SensorReading::new("120/80", 98.0, 70.0, 90.0)).unwrap();
/// assert!(source.poll().is_some());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<SensorReading>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where readings come from
    pub fn new(mut receiver: watch::Receiver<SensorReading>, source_description: &str) -> Self {
        receiver.mark_unchanged();
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair for sending readings to a ChannelSource.
    pub fn create(source_description: &str) -> (watch::Sender<SensorReading>, Self) {
        let (tx, rx) = watch::channel(SensorReading::default());
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<SensorReading> {
        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        None
    }
}
