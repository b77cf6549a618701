//! Inferencia nad jedným záznamom s uloženým modelom a scalerom.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data_loading::data_loader::rows_to_matrix;
use crate::error::{PipelineError, Result};
use crate::models::{label_for, Classifier, Model};
use crate::pipeline::ArtifactStore;
use crate::processing::StandardScaler;
use crate::schema::{resolve_features, Record};

/// Výsledok predikcie, zároveň JSON odpoveď `/predict`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub probability_of_default: f64,
    pub predicted_label: i32,
}

/// Model + scaler naučené spolu. Po vytvorení sa už nemenia.
pub struct Predictor {
    model: Model,
    scaler: StandardScaler,
    /// Pre každý stĺpec scalera index do [`Record::values`]
    column_order: Vec<usize>,
}

impl Predictor {
    /// Overí, že scaler a model sedia s kanonickou schémou
    pub fn new(model: Model, scaler: StandardScaler) -> Result<Self> {
        if !model.is_trained() {
            return Err(PipelineError::schema("model artifact is not trained"));
        }
        if !scaler.is_fitted() {
            return Err(PipelineError::schema("scaler artifact is not fitted"));
        }
        let width = scaler.feature_names().len();
        if model.n_features() != Some(width) {
            return Err(PipelineError::schema(format!(
                "model expects {:?} features but scaler provides {} {:?}",
                model.n_features(),
                width,
                scaler.feature_names()
            )));
        }
        let column_order = resolve_features(scaler.feature_names())?;

        let mut seen = column_order.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != column_order.len() {
            return Err(PipelineError::schema(format!(
                "scaler lists a feature twice: {:?}",
                scaler.feature_names()
            )));
        }

        Ok(Self {
            model,
            scaler,
            column_order,
        })
    }

    /// Načíta `best_model.json` a `scaler_standard.json` z úložiska artefaktov
    pub fn load(store: &ArtifactStore) -> Result<Self> {
        let model = store.load_best_model()?;
        let scaler = store.load_scaler()?;
        info!(
            model = model.get_name(),
            features = ?scaler.feature_names(),
            root = %store.root().display(),
            "loaded model and scaler"
        );
        Self::new(model, scaler)
    }

    pub fn model_name(&self) -> &str {
        self.model.get_name()
    }

    pub fn feature_names(&self) -> &[String] {
        self.scaler.feature_names()
    }

    /// Predikcia pre jeden záznam
    pub fn predict(&self, record: &Record) -> Result<Prediction> {
        let values = record.values();
        let row: Vec<f64> = self.column_order.iter().map(|&idx| values[idx]).collect();
        if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
            return Err(PipelineError::schema(format!("feature value {} is not finite", bad)));
        }

        let scaled = self.scaler.transform_row(&row)?;
        let proba = self
            .model
            .predict_proba(&rows_to_matrix(&[scaled])?)?
            .first()
            .copied()
            .ok_or_else(|| PipelineError::schema("model returned no prediction"))?;

        Ok(Prediction {
            probability_of_default: proba,
            predicted_label: label_for(proba),
        })
    }
}
