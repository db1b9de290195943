//! On-demand analysis of the displayed readings.
//!
//! The advisor reads the four slot texts exactly as shown (placeholders and
//! `Error` included), sends them to the analysis service and hands one
//! [`Recommendation`] back per request.

use tokio::sync::mpsc;

use vitalwatch_adapters::GeminiClient;
use vitalwatch_types::Metric;

use crate::data::{Display, Recommendation};

/// Build the analysis prompt from the displayed slot texts.
pub fn build_prompt(display: &Display) -> String {
    let readings = format!(
        "\n        Heart Rate: {}, \n        Blood Pressure: {}, \n        Oxygen Saturation: {}, \n        Glucose: {}",
        display.text(Metric::HeartRate),
        display.text(Metric::BloodPressure),
        display.text(Metric::OxygenSaturation),
        display.text(Metric::Glucose),
    );
    format!(
        "Based on the following health sensor readings, provide analysis of body condition. \
         Highlight potential abnormalities and recommend remedies. The readings are:\n\n{}",
        readings
    )
}

/// Dispatches analysis requests and collects their results.
///
/// Requests run concurrently; results arrive in completion order.
#[derive(Debug)]
pub struct Advisor {
    client: GeminiClient,
    sender: mpsc::UnboundedSender<Recommendation>,
    receiver: mpsc::UnboundedReceiver<Recommendation>,
    pending: usize,
    next_id: u64,
}

impl Advisor {
    pub fn new(client: GeminiClient) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            client,
            sender,
            receiver,
            pending: 0,
            next_id: 1,
        }
    }

    /// Start an analysis of what `display` currently shows.
    ///
    /// Returns the request id. Must be called from within a tokio runtime.
    pub fn request(&mut self, display: &Display) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.pending += 1;

        let prompt = build_prompt(display);
        let client = self.client.clone();
        let sender = self.sender.clone();
        tracing::info!(id, "Requesting analysis");

        tokio::spawn(async move {
            let outcome = client.generate(&prompt).await;
            if let Err(ref e) = outcome {
                tracing::error!(id, error = %e, "Error fetching analysis");
            }
            let _ = sender.send(Recommendation::from_outcome(id, outcome));
        });

        id
    }

    /// Take the next finished result, if any.
    pub fn poll(&mut self) -> Option<Recommendation> {
        let entry = self.receiver.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(entry)
    }

    /// Requests issued but not yet answered.
    pub fn pending(&self) -> usize {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DisplayContext, RecommendationKind, RecommendationList};
    use crate::testing::{closed_url, TestServer};
    use std::time::Duration;
    use vitalwatch_types::{NormalRanges, SensorReading};

    const ANSWER: &str = r#"{"candidates":[{"content":{"parts":[{"text":"Readings look healthy."}]}}]}"#;

    fn displayed(reading: &SensorReading) -> Display {
        let mut display = Display::new();
        let mut ctx = DisplayContext::new(NormalRanges::default());
        display.apply(reading, &mut ctx);
        display
    }

    fn advisor(url: &str) -> Advisor {
        Advisor::new(
            GeminiClient::builder()
                .endpoint(url)
                .timeout(Duration::from_secs(2))
                .build()
                .unwrap(),
        )
    }

    async fn collect(advisor: &mut Advisor, list: &mut RecommendationList, count: usize) {
        for _ in 0..200 {
            while let Some(entry) = advisor.poll() {
                list.push(entry);
            }
            if list.len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[test]
    fn test_prompt_uses_displayed_text() {
        let display = displayed(&SensorReading::new("120/80", 98.0, 70.0, 90.0));
        let prompt = build_prompt(&display);

        assert!(prompt.starts_with(
            "Based on the following health sensor readings, provide analysis of body condition. \
             Highlight potential abnormalities and recommend remedies. The readings are:\n\n"
        ));
        assert!(prompt.ends_with(
            "\n        Heart Rate: 70, \n        Blood Pressure: 120/80, \n        Oxygen Saturation: 98, \n        Glucose: 90"
        ));
    }

    #[test]
    fn test_prompt_includes_placeholders_and_errors() {
        let prompt = build_prompt(&Display::new());
        assert!(prompt.contains("Heart Rate: -- bpm, "));
        assert!(prompt.contains("Glucose: -- mg/dL"));

        let prompt = build_prompt(&displayed(&SensorReading::error_sentinel()));
        assert!(prompt.contains("Blood Pressure: Error, "));
    }

    #[tokio::test]
    async fn test_successful_request_appends_one_entry() {
        let server = TestServer::serve(200, ANSWER).await;
        let mut advisor = advisor(&server.url);
        let mut list = RecommendationList::new();

        let id = advisor.request(&displayed(&SensorReading::new("120/80", 98.0, 70.0, 90.0)));
        assert_eq!(advisor.pending(), 1);

        collect(&mut advisor, &mut list, 1).await;
        assert_eq!(list.len(), 1);
        let entry = list.last().unwrap();
        assert_eq!(entry.id, id);
        assert_eq!(entry.kind, RecommendationKind::Analysis);
        assert_eq!(entry.text, "AI Analysis:\nReadings look healthy.");
        assert_eq!(advisor.pending(), 0);

        let requests = server.requests();
        assert!(requests[0].contains("Heart Rate: 70"));
    }

    #[tokio::test]
    async fn test_failed_request_appends_error_entry() {
        let server = TestServer::serve(403, r#"{"error":"denied"}"#).await;
        let mut advisor = advisor(&server.url);
        let mut list = RecommendationList::new();

        advisor.request(&Display::new());
        collect(&mut advisor, &mut list, 1).await;

        assert_eq!(list.len(), 1);
        assert_eq!(
            list.last().unwrap().text,
            "Error occurred while fetching analysis: API returned status 403"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_appends_error_entry() {
        let mut advisor = advisor(&closed_url().await);
        let mut list = RecommendationList::new();

        advisor.request(&Display::new());
        collect(&mut advisor, &mut list, 1).await;

        assert_eq!(list.len(), 1);
        assert!(list.last().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_empty_answer_uses_placeholder() {
        let server = TestServer::serve(200, r#"{"candidates":[]}"#).await;
        let mut advisor = advisor(&server.url);
        let mut list = RecommendationList::new();

        advisor.request(&Display::new());
        collect(&mut advisor, &mut list, 1).await;

        assert_eq!(list.last().unwrap().text, "AI Analysis:\nNo prediction available.");
    }

    #[tokio::test]
    async fn test_each_request_appends_exactly_once() {
        let server = TestServer::serve(200, ANSWER).await;
        let mut advisor = advisor(&server.url);
        let mut list = RecommendationList::new();

        for _ in 0..3 {
            advisor.request(&Display::new());
        }
        collect(&mut advisor, &mut list, 3).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        while let Some(entry) = advisor.poll() {
            list.push(entry);
        }

        assert_eq!(list.len(), 3);
        let mut ids: Vec<u64> = list.iter().map(|r| r.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(server.hits(), 3);
    }
}
