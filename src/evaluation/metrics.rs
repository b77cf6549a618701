use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Názov metriky, podľa ktorej sa vyberá víťazný model
pub const SELECTION_METRIC: &str = "roc_auc";

/// Metriky jedného modelu na testovacej časti; časť `training_report.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub model_name: String,
    pub evaluation_type: String,
    pub metrics: BTreeMap<String, f64>,
}

impl EvaluationReport {
    pub fn new(model_name: impl Into<String>, evaluation_type: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            evaluation_type: evaluation_type.into(),
            metrics: BTreeMap::new(),
        }
    }

    pub fn add_metric(&mut self, name: impl Into<String>, value: f64) {
        self.metrics.insert(name.into(), value);
    }

    pub fn get_metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Skóre pre výber modelu
    pub fn selection_score(&self) -> Option<f64> {
        self.get_metric(SELECTION_METRIC)
    }
}
