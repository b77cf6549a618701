use std::path::PathBuf;
use thiserror::Error;

/// Chyby celého pipeline (načítanie, preprocessing, tréning, inferencia)
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Chýbajúce alebo nesúhlasiace stĺpce, neplatné parametre splitu
    #[error("schema error: {0}")]
    Schema(String),

    /// Artefakt (model / scaler) nie je na disku alebo sa nedá načítať
    #[error("resource unavailable at {}: {reason}", path.display())]
    ResourceUnavailable { path: PathBuf, reason: String },

    #[error("training failed: {0}")]
    Training(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn training(msg: impl Into<String>) -> Self {
        Self::Training(msg.into())
    }

    pub fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ResourceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
