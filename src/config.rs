//! Konfigurácia tréningu a servera.
//!
//! Server sa dá nastaviť YAML súborom ([`load_server_config`]); chýbajúce
//! položky majú hodnoty z [`ServerConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Parametre jedného tréningového behu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub out_dir: PathBuf,
    pub random_state: u64,
    pub test_size: f64,
    /// (model, parameter, hodnota), napr. ("random_forest", "n_estimators", "200")
    pub model_params: Vec<(String, String, String)>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::new(),
            out_dir: PathBuf::from("."),
            random_state: 42,
            test_size: 0.2,
            model_params: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Koreň artefaktov, modely sú v `<artifact_dir>/models`
    pub artifact_dir: PathBuf,
    /// Zostavený front-end (index.html + assets)
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            artifact_dir: PathBuf::from("."),
            static_dir: PathBuf::from("ui/dist"),
        }
    }
}

/// Načíta [`ServerConfig`] z YAML súboru
pub fn load_server_config(path: &Path) -> Result<ServerConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::unavailable(path, format!("cannot read config file: {}", e))
    })?;
    serde_yaml::from_str(&contents)
        .map_err(|e| PipelineError::schema(format!("invalid config YAML: {}", e)))
}
