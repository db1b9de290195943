//! Model hosting: the figure shown next to the readings.
//!
//! The dashboard draws a plain-text figure whose tint signals the current
//! verdict. [`ModelLoader`] loads it in the background; until it arrives the
//! display updater has nothing to recolor and skips that step.

mod loader;
mod model;

pub use loader::{LoadEvent, LoadState, ModelLoader};
pub use model::{ModelPart, SceneModel, Tint};
