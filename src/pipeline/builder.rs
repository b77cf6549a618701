use std::path::PathBuf;

use super::pipeline::TrainingPipeline;
use crate::config::TrainConfig;
use crate::error::{PipelineError, Result};
use crate::models::{Classifier, ModelFactory};

/// Builder pre konfiguráciu tréningového pipeline
pub struct TrainingPipelineBuilder {
    config: TrainConfig,
}

impl TrainingPipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: TrainConfig::default(),
        }
    }

    /// Začne z hotovej konfigurácie
    pub fn from_config(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Nastaví cestu k datasetu
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Nastaví výstupný adresár (modely a spracované dáta)
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.out_dir = dir.into();
        self
    }

    pub fn random_state(mut self, seed: u64) -> Self {
        self.config.random_state = seed;
        self
    }

    pub fn test_size(mut self, test_size: f64) -> Self {
        self.config.test_size = test_size;
        self
    }

    /// Nastaví parameter jedného z kandidátskych modelov
    pub fn model_param(mut self, model: &str, key: &str, value: &str) -> Self {
        self.config
            .model_params
            .push((model.to_string(), key.to_string(), value.to_string()));
        self
    }

    /// Vytvorí pipeline s validáciou parametrov
    pub fn build(self) -> Result<TrainingPipeline> {
        if self.config.data_path.as_os_str().is_empty() {
            return Err(PipelineError::schema("data path must be set"));
        }
        if !(self.config.test_size > 0.0 && self.config.test_size < 1.0) {
            return Err(PipelineError::schema(format!(
                "test_size must be in (0, 1), got {}",
                self.config.test_size
            )));
        }

        // parametre sa overia hneď, nie až po načítaní dát
        for (model, key, value) in &self.config.model_params {
            let mut candidate = ModelFactory::create(model)?;
            candidate.set_param(key, value)?;
        }

        Ok(TrainingPipeline::new(self.config))
    }
}

impl Default for TrainingPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
