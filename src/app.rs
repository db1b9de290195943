//! Application state and interaction logic.

use std::path::Path;
use std::time::{Duration, Instant, UNIX_EPOCH};

use anyhow::Result;
use vitalwatch_types::NormalRanges;

use crate::advisor::Advisor;
use crate::data::{Display, DisplayContext, History, RecommendationList};
use crate::scene::{LoadState, ModelLoader};
use crate::source::DataSource;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// Only the UI loop mutates this. Network work happens in background tasks
/// owned by the source, the model loader and the advisor, and is collected
/// by [`App::reload_data`].
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Readings
    source: Box<dyn DataSource>,
    pub display: Display,
    pub context: DisplayContext,
    pub history: History,
    pub load_error: Option<String>,

    // Model
    loader: Option<ModelLoader>,

    // Analysis
    advisor: Option<Advisor>,
    pub recommendations: RecommendationList,
    /// Index of the selected recommendation.
    pub selected_recommendation: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source` and judging by `ranges`.
    pub fn new(source: Box<dyn DataSource>, ranges: NormalRanges) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            display: Display::new(),
            context: DisplayContext::new(ranges),
            history: History::new(),
            load_error: None,
            loader: None,
            advisor: None,
            recommendations: RecommendationList::new(),
            selected_recommendation: 0,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Show the model delivered by `loader` once it has loaded.
    pub fn with_loader(mut self, loader: ModelLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Enable analysis requests.
    pub fn with_advisor(mut self, advisor: Advisor) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Number of sensor requests on the wire.
    pub fn fetches_in_flight(&self) -> usize {
        self.source.in_flight()
    }

    /// Number of analysis requests awaiting an answer.
    pub fn analyses_pending(&self) -> usize {
        self.advisor.as_ref().map_or(0, Advisor::pending)
    }

    /// State of the model load, if a loader was attached.
    pub fn model_state(&self) -> Option<&LoadState> {
        self.loader.as_ref().map(ModelLoader::state)
    }

    /// What the model loader is loading.
    pub fn model_description(&self) -> Option<&str> {
        self.loader.as_ref().map(ModelLoader::description)
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_TTL => Some(msg),
            _ => None,
        }
    }

    /// Collect everything the background tasks produced since the last call.
    ///
    /// Returns true if at least one new reading was applied.
    pub fn reload_data(&mut self) -> bool {
        self.poll_model();
        let updated = self.poll_readings();
        self.poll_recommendations();
        updated
    }

    fn poll_readings(&mut self) -> bool {
        let mut updated = false;
        // Readings are applied in arrival order; the last one wins
        while let Some(reading) = self.source.poll() {
            let verdict = self.display.apply(&reading, &mut self.context);
            tracing::debug!(?verdict, "Reading applied");
            if let Some(assessment) = self.display.assessment() {
                self.history.record(assessment);
            }
            updated = true;
        }
        self.load_error = self.source.error();
        updated
    }

    fn poll_model(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        if let Some(model) = loader.poll() {
            // Tinted by the next reading
            self.context.attach_model(model);
        }
    }

    fn poll_recommendations(&mut self) {
        let Some(advisor) = self.advisor.as_mut() else {
            return;
        };
        while let Some(entry) = advisor.poll() {
            let following = self.recommendations.is_empty()
                || self.selected_recommendation + 1 >= self.recommendations.len();
            self.recommendations.push(entry);
            if following {
                self.selected_recommendation = self.recommendations.len() - 1;
            }
        }
    }

    /// Ask for an analysis of the readings currently displayed.
    pub fn request_analysis(&mut self) {
        match self.advisor.as_mut() {
            Some(advisor) => {
                let id = advisor.request(&self.display);
                self.set_status_message(format!("Analysis #{} requested", id));
            }
            None => self.set_status_message("Analysis is not available".to_string()),
        }
    }

    /// Fetch a reading now instead of waiting for the next tick.
    pub fn poll_now(&mut self) {
        self.source.poll_now();
        self.set_status_message("Polling sensor".to_string());
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.recommendations.len().saturating_sub(1);
        self.selected_recommendation = (self.selected_recommendation + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_recommendation = self.selected_recommendation.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_recommendation = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_recommendation = self.recommendations.len().saturating_sub(1);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export what is displayed, plus the recommendation list, to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        use std::io::Write;

        if self.display.reading().is_none() {
            anyhow::bail!("No reading to export");
        }

        let mut export = self.display.to_json();
        let entries: Vec<serde_json::Value> = self
            .recommendations
            .iter()
            .map(|r| {
                let received_at = r
                    .received_at
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or_default();
                serde_json::json!({
                    "id": r.id,
                    "error": r.is_error(),
                    "text": r.text,
                    "receivedAt": received_at,
                })
            })
            .collect();
        export["recommendations"] = serde_json::Value::Array(entries);

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}
