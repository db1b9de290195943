//! Display state: the four text slots and the model tint.
//!
//! [`Display::apply`] is the single entry point for a new reading. It writes
//! the slot texts, evaluates the reading and recolors the model held by the
//! [`DisplayContext`], if one has been loaded.

use std::time::Instant;

use serde_json::{json, Map, Value};
use vitalwatch_types::{Metric, MetricValue, NormalRanges, SensorReading};

use super::assess::{assess, Assessment, Verdict};
use crate::scene::{SceneModel, Tint};

/// Everything the display updater needs besides the reading itself.
#[derive(Debug, Clone)]
pub struct DisplayContext {
    model: Option<SceneModel>,
    ranges: NormalRanges,
}

impl DisplayContext {
    /// Create a context with no model loaded yet.
    pub fn new(ranges: NormalRanges) -> Self {
        Self {
            model: None,
            ranges,
        }
    }

    pub fn ranges(&self) -> &NormalRanges {
        &self.ranges
    }

    pub fn model(&self) -> Option<&SceneModel> {
        self.model.as_ref()
    }

    /// Hand over the loaded model. It keeps its current tint until the next
    /// reading is applied.
    pub fn attach_model(&mut self, model: SceneModel) {
        self.model = Some(model);
    }

    /// Recolor the model for `verdict`. Returns false if no model is loaded.
    pub fn recolor(&mut self, verdict: Verdict) -> bool {
        match self.model.as_mut() {
            Some(model) => {
                model.recolor(tint_for(verdict));
                true
            }
            None => false,
        }
    }
}

/// Model tint for a verdict.
pub fn tint_for(verdict: Verdict) -> Tint {
    match verdict {
        Verdict::Normal => Tint::NEUTRAL,
        Verdict::Abnormal => Tint::WARNING,
    }
}

/// Text shown in a slot for `value`.
///
/// Absent and blank values (empty text, `0`, NaN) show the metric's
/// placeholder.
pub fn slot_text(metric: Metric, value: Option<&MetricValue>) -> String {
    match value {
        Some(v) if !v.is_blank() => v.to_string(),
        _ => metric.placeholder().to_string(),
    }
}

/// Text slots and the outcome of the last applied reading.
#[derive(Debug, Clone)]
pub struct Display {
    slots: [String; 4],
    reading: Option<SensorReading>,
    assessment: Option<Assessment>,
    pub last_updated: Option<Instant>,
    /// Number of readings applied since start.
    pub updates: u64,
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    /// All slots show their placeholders.
    pub fn new() -> Self {
        Self {
            slots: Metric::ALL.map(|m| m.placeholder().to_string()),
            reading: None,
            assessment: None,
            last_updated: None,
            updates: 0,
        }
    }

    /// Current text of a slot.
    pub fn text(&self, metric: Metric) -> &str {
        &self.slots[slot_index(metric)]
    }

    /// All slots, in display order.
    pub fn slots(&self) -> impl Iterator<Item = (Metric, &str)> {
        Metric::ALL.into_iter().zip(self.slots.iter().map(String::as_str))
    }

    /// The last applied reading.
    pub fn reading(&self) -> Option<&SensorReading> {
        self.reading.as_ref()
    }

    /// Assessment of the last applied reading.
    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    /// Verdict of the last applied reading.
    pub fn verdict(&self) -> Option<Verdict> {
        self.assessment.as_ref().map(Assessment::verdict)
    }

    /// Show `reading`, evaluate it and recolor the model.
    pub fn apply(&mut self, reading: &SensorReading, ctx: &mut DisplayContext) -> Verdict {
        for metric in Metric::ALL {
            self.slots[slot_index(metric)] = slot_text(metric, reading.get(metric));
        }

        let assessment = assess(reading, ctx.ranges());
        let verdict = assessment.verdict();
        if !ctx.recolor(verdict) {
            tracing::trace!("Model not loaded yet, skipping recolor");
        }

        self.reading = Some(reading.clone());
        self.assessment = Some(assessment);
        self.last_updated = Some(Instant::now());
        self.updates += 1;
        verdict
    }

    /// JSON view of what is shown: the raw reading, the slot texts, every
    /// check and the verdict.
    pub fn to_json(&self) -> Value {
        let slots: Map<String, Value> = self
            .slots()
            .map(|(metric, text)| (metric.field_name().to_string(), json!(text)))
            .collect();

        json!({
            "reading": self.reading,
            "slots": slots,
            "checks": self.assessment.as_ref().map(|a| &a.checks),
            "verdict": self.verdict(),
        })
    }
}

fn slot_index(metric: Metric) -> usize {
    match metric {
        Metric::BloodPressure => 0,
        Metric::OxygenSaturation => 1,
        Metric::HeartRate => 2,
        Metric::Glucose => 3,
    }
}
