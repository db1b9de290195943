//! Append-only list of analysis results.

use std::time::SystemTime;

use vitalwatch_adapters::{AdapterError, Analysis};

/// Placeholder shown when the service returns no usable text.
pub const NO_PREDICTION: &str = "No prediction available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationKind {
    Analysis,
    Error,
}

/// One entry of the recommendation list.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Request number, in issue order. Entries may complete out of order.
    pub id: u64,
    pub kind: RecommendationKind,
    pub text: String,
    pub received_at: SystemTime,
}

impl Recommendation {
    /// Build the entry for a finished request.
    pub fn from_outcome(id: u64, outcome: Result<Analysis, AdapterError>) -> Self {
        let (kind, text) = match outcome {
            Ok(analysis) => (
                RecommendationKind::Analysis,
                format!("AI Analysis:\n{}", analysis.text_or(NO_PREDICTION)),
            ),
            Err(e) => (
                RecommendationKind::Error,
                format!("Error occurred while fetching analysis: {}", e),
            ),
        };
        Self {
            id,
            kind,
            text,
            received_at: SystemTime::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == RecommendationKind::Error
    }
}

/// Ordered list of entries. Entries are never removed or merged.
#[derive(Debug, Clone, Default)]
pub struct RecommendationList {
    entries: Vec<Recommendation>,
}

impl RecommendationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Recommendation) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Recommendation> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&Recommendation> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.entries.iter()
    }
}
