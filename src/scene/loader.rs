//! Asynchronous model loading with progress reporting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

use super::SceneModel;

/// Bytes read per progress step.
const CHUNK_SIZE: usize = 4096;

/// Progress notifications sent by the loader task.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// Percentage of the file read so far (0-100).
    Progress(f64),
    Loaded(SceneModel),
    Failed(String),
}

/// Current state of a model load, as seen by the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading(f64),
    Loaded,
    Failed(String),
}

/// Loads a model in a background task.
///
/// Call [`ModelLoader::poll`] from the UI loop; it never blocks.
#[derive(Debug)]
pub struct ModelLoader {
    receiver: mpsc::UnboundedReceiver<LoadEvent>,
    state: LoadState,
    description: String,
}

impl ModelLoader {
    /// Start loading `path`, or the built-in figure when `path` is `None`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(path: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let description = path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_string());

        tokio::spawn(async move {
            let event = match path {
                Some(path) => match load_file(&path, &tx).await {
                    Ok(model) => LoadEvent::Loaded(model),
                    Err(e) => {
                        tracing::error!(path = %path.display(), error = %e, "Failed to load model");
                        LoadEvent::Failed(format!("{:#}", e))
                    }
                },
                None => {
                    let _ = tx.send(LoadEvent::Progress(100.0));
                    LoadEvent::Loaded(SceneModel::builtin())
                }
            };
            let _ = tx.send(event);
        });

        Self {
            receiver: rx,
            state: LoadState::Loading(0.0),
            description,
        }
    }

    /// Drain pending events, updating the load state.
    ///
    /// Returns the model once, when loading completes.
    pub fn poll(&mut self) -> Option<SceneModel> {
        while let Ok(event) = self.receiver.try_recv() {
            match event {
                LoadEvent::Progress(pct) => {
                    tracing::debug!(progress = pct, "Loading model");
                    self.state = LoadState::Loading(pct);
                }
                LoadEvent::Loaded(model) => {
                    tracing::info!(model = %model.name, parts = model.parts.len(), "Model loaded");
                    self.state = LoadState::Loaded;
                    return Some(model);
                }
                LoadEvent::Failed(err) => {
                    self.state = LoadState::Failed(err);
                }
            }
        }
        None
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// What is being loaded (a path or `builtin`).
    pub fn description(&self) -> &str {
        &self.description
    }
}

async fn load_file(path: &Path, tx: &mpsc::UnboundedSender<LoadEvent>) -> Result<SceneModel> {
    let mut file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("opening {}", path.display()))?;
    let total = file.metadata().await?.len() as usize;

    let mut bytes = Vec::with_capacity(total);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        if total > 0 {
            let pct = (bytes.len() as f64 / total as f64 * 100.0).min(100.0);
            let _ = tx.send(LoadEvent::Progress(pct));
        }
    }

    let text = String::from_utf8(bytes).context("model file is not valid UTF-8")?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    SceneModel::parse(name, &text)
}
