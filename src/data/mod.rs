//! Evaluation and display state for sensor readings.
//!
//! ## Submodules
//!
//! - [`assess`]: Normal-range evaluation ([`Assessment`], [`Verdict`])
//! - [`display`]: Text slots and model recoloring ([`Display`], [`DisplayContext`])
//! - [`history`]: Recent values for sparklines
//! - [`recommendations`]: Append-only list of analysis results
//!
//! ## Data Flow
//!
//! ```text
//! SensorReading (JSON or sentinel)
//!        │
//!        ▼
//! Display::apply()
//!        │
//!        ├──▶ slot texts (placeholders for blank values)
//!        ├──▶ assess() ──▶ Verdict ──▶ DisplayContext::recolor()
//!        │
//!        └──▶ History::record() (for sparklines)
//! ```

pub mod assess;
pub mod display;
pub mod history;
pub mod recommendations;

pub use assess::{assess, is_normal, Assessment, CheckStatus, MetricCheck, Quantity, Verdict};
pub use display::{slot_text, tint_for, Display, DisplayContext};
pub use history::History;
pub use recommendations::{Recommendation, RecommendationKind, RecommendationList, NO_PREDICTION};
