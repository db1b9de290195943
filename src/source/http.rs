//! Scheduled polling of the sensor endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use vitalwatch_adapters::SensorClient;
use vitalwatch_types::SensorReading;

use super::DataSource;

/// State shared between the source and its fetch tasks.
#[derive(Debug, Default)]
struct Shared {
    in_flight: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

/// A data source that fetches a reading from the sensor every interval.
///
/// Every tick starts an independent request. Requests may overlap; their
/// readings are delivered in completion order, so the slowest response of
/// an overlapping pair wins. A failed request delivers the error sentinel.
///
/// The first request goes out one interval after the source is spawned.
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<SensorReading>,
    trigger: mpsc::UnboundedSender<()>,
    description: String,
    shared: Arc<Shared>,
    scheduler: JoinHandle<()>,
}

impl HttpSource {
    /// Start polling with `client` every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(client: SensorClient, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let (trigger_tx, mut trigger_rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared::default());
        let description = format!("http: {}", client.url());

        let task_shared = shared.clone();
        let scheduler = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    trigger = trigger_rx.recv() => {
                        if trigger.is_none() {
                            break;
                        }
                        tracing::debug!("Immediate poll requested");
                    }
                }

                if tx.is_closed() {
                    break;
                }
                spawn_fetch(client.clone(), tx.clone(), task_shared.clone());
            }
        });

        Self {
            receiver: rx,
            trigger: trigger_tx,
            description,
            shared,
            scheduler,
        }
    }
}

fn spawn_fetch(client: SensorClient, tx: mpsc::Sender<SensorReading>, shared: Arc<Shared>) {
    tokio::spawn(async move {
        shared.in_flight.fetch_add(1, Ordering::SeqCst);
        let result = client.fetch().await;
        shared.in_flight.fetch_sub(1, Ordering::SeqCst);

        let reading = match result {
            Ok(reading) => {
                tracing::debug!(?reading, "Sensor reading received");
                *shared.last_error.lock() = None;
                reading
            }
            Err(e) => {
                tracing::warn!(url = %client.url(), error = %e, "Error fetching sensor data");
                *shared.last_error.lock() = Some(e.to_string());
                SensorReading::error_sentinel()
            }
        };

        // Receiver dropped means the dashboard is shutting down
        let _ = tx.send(reading).await;
    });
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<SensorReading> {
        self.receiver.try_recv().ok()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.shared.last_error.lock().clone()
    }

    fn in_flight(&self) -> usize {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    fn poll_now(&mut self) {
        let _ = self.trigger.send(());
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.scheduler.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Display, DisplayContext};
    use crate::testing::{closed_url, TestServer};
    use vitalwatch_types::NormalRanges;

    const READING: &str =
        r#"{"bloodPressure":"120/80","oxygenSaturation":98,"heartRate":70,"glucose":90}"#;

    fn client(url: &str) -> SensorClient {
        SensorClient::builder()
            .endpoint(url)
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    async fn wait_for_reading(source: &mut HttpSource) -> Option<SensorReading> {
        for _ in 0..200 {
            if let Some(reading) = source.poll() {
                return Some(reading);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_poll_now_fetches_reading() {
        let server = TestServer::serve(200, READING).await;
        let mut source = HttpSource::spawn(client(&server.url), Duration::from_secs(60));
        assert!(source.description().ends_with("/sensor-data"));

        source.poll_now();
        let reading = wait_for_reading(&mut source).await.unwrap();

        assert_eq!(reading, SensorReading::new("120/80", 98.0, 70.0, 90.0));
        assert!(source.error().is_none());
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_first_fetch_waits_one_interval() {
        let server = TestServer::serve(200, READING).await;
        let mut source = HttpSource::spawn(client(&server.url), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(source.poll().is_none());
        assert_eq!(server.hits(), 0);
    }

    #[tokio::test]
    async fn test_polls_on_interval() {
        let server = TestServer::serve(200, READING).await;
        let mut source = HttpSource::spawn(client(&server.url), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(400)).await;

        let mut received = 0;
        while source.poll().is_some() {
            received += 1;
        }
        assert!(received >= 2, "received {}", received);
    }

    #[tokio::test]
    async fn test_unreachable_sensor_delivers_sentinel() {
        let mut source = HttpSource::spawn(client(&closed_url().await), Duration::from_secs(60));

        source.poll_now();
        let reading = wait_for_reading(&mut source).await.unwrap();

        assert!(reading.is_error_sentinel());
        assert!(source.error().is_some());
        assert_eq!(source.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_error_status_delivers_sentinel() {
        let server = TestServer::serve(500, "oops").await;
        let mut source = HttpSource::spawn(client(&server.url), Duration::from_secs(60));

        source.poll_now();
        let reading = wait_for_reading(&mut source).await.unwrap();

        assert!(reading.is_error_sentinel());
        assert_eq!(source.error().as_deref(), Some("API returned status 500"));
    }

    #[tokio::test]
    async fn test_malformed_body_delivers_sentinel() {
        let server = TestServer::serve(200, "not json").await;
        let mut source = HttpSource::spawn(client(&server.url), Duration::from_secs(60));

        source.poll_now();
        let reading = wait_for_reading(&mut source).await.unwrap();
        assert!(reading.is_error_sentinel());
    }

    #[tokio::test]
    async fn test_reading_without_text_blood_pressure_delivers_sentinel() {
        for body in [
            r#"{"oxygenSaturation":98,"heartRate":70,"glucose":90}"#,
            r#"{"bloodPressure":120,"oxygenSaturation":98,"heartRate":70,"glucose":90}"#,
        ] {
            let server = TestServer::serve(200, body).await;
            let mut source = HttpSource::spawn(client(&server.url), Duration::from_secs(60));

            source.poll_now();
            let reading = wait_for_reading(&mut source).await.unwrap();
            assert!(reading.is_error_sentinel(), "{}", body);
            assert!(source.error().is_some());

            let mut display = Display::new();
            let mut ctx = DisplayContext::new(NormalRanges::default());
            display.apply(&reading, &mut ctx);
            for (_, text) in display.slots() {
                assert_eq!(text, "Error");
            }
        }
    }

    #[tokio::test]
    async fn test_recovers_after_failure() {
        let server = TestServer::serve(200, READING).await;
        let mut source = HttpSource::spawn(client(&server.url), Duration::from_secs(60));
        *source.shared.last_error.lock() = Some("earlier failure".to_string());

        source.poll_now();
        wait_for_reading(&mut source).await.unwrap();
        assert!(source.error().is_none());
    }
}
