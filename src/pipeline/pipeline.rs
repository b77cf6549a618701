use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::collections::BTreeMap;
use tracing::info;

use super::artifacts::{ArtifactStore, TEST_EXPORT_FILE, TRAIN_EXPORT_FILE};
use super::builder::TrainingPipelineBuilder;
use crate::config::TrainConfig;
use crate::data_loading::{DataLoaderFactory, LoadedData};
use crate::error::{PipelineError, Result};
use crate::evaluation::{EvaluationReport, ModelEvaluator};
use crate::models::{Classifier, Model, ModelFactory};
use crate::processing::{split_and_scale, PreparedData};
use crate::schema::{FEATURE_NAMES, TARGET_COLUMN};

/// Kandidáti v poradí tréningu
const CANDIDATES: [&str; 2] = ["logreg", "random_forest"];

/// Súhrn tréningového behu, ukladá sa ako `training_report.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub best_model: String,
    pub auc: BTreeMap<String, f64>,
    pub reports: Vec<EvaluationReport>,
    pub train_rows: usize,
    pub test_rows: usize,
    pub random_state: u64,
}

/// Výber víťaza podľa AUC; pri rovnosti vyhráva random forest
pub fn prefer_forest(logreg_auc: f64, forest_auc: f64) -> bool {
    forest_auc >= logreg_auc
}

/// Facade pre celý tréning: načítanie, split + škálovanie, tréning oboch
/// kandidátov, vyhodnotenie, výber a uloženie artefaktov
pub struct TrainingPipeline {
    config: TrainConfig,
}

impl TrainingPipeline {
    /// Vytvorí builder pre konfiguráciu pipeline
    pub fn builder() -> TrainingPipelineBuilder {
        TrainingPipelineBuilder::new()
    }

    pub(crate) fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Načíta dataset a vyberie kanonické príznaky
    pub fn load_data(&self) -> Result<LoadedData> {
        let path = &self.config.data_path;
        let mut loader = DataLoaderFactory::create_for_path(path)?;
        let data = loader.load_from_path(path, TARGET_COLUMN)?;
        info!(
            path = %path.display(),
            loader = loader.get_name(),
            rows = data.num_samples(),
            "dataset loaded"
        );
        data.select_features(&FEATURE_NAMES)
    }

    /// Vytvorí kandidátsky model s parametrami z konfigurácie
    fn candidate(&self, name: &str) -> Result<Model> {
        let mut model = ModelFactory::create(name)?;
        if model.get_supported_params().contains(&"seed") {
            model.set_param("seed", &self.config.random_state.to_string())?;
        }
        for (target, key, value) in &self.config.model_params {
            let target_key = ModelFactory::create(target)?.key();
            if target_key == model.key() {
                model.set_param(key, value)?;
            }
        }
        Ok(model)
    }

    /// Kompletný workflow. Artefakty sa zapisujú postupne; pri chybe
    /// ostanú iba tie, ktoré boli zapísané pred ňou.
    pub fn run(&self) -> Result<TrainingSummary> {
        let store = ArtifactStore::new(&self.config.out_dir);

        let data = self.load_data()?;
        let prepared = split_and_scale(&data, self.config.test_size, self.config.random_state)?;
        store.save_scaler(&prepared.scaler)?;

        let mut trained = Vec::with_capacity(CANDIDATES.len());
        for name in CANDIDATES {
            let mut model = self.candidate(name)?;
            info!(model = model.get_name(), "training");
            model.train(&prepared.x_train, &prepared.y_train)?;
            let path = store.save_model(&model)?;
            info!(model = model.get_name(), path = %path.display(), "model saved");
            trained.push(model);
        }

        let mut reports = Vec::with_capacity(trained.len());
        let mut auc = BTreeMap::new();
        for model in &trained {
            let proba = model.predict_proba(&prepared.x_test)?;
            let report =
                ModelEvaluator::evaluate_classification(&prepared.y_test, &proba, model.get_name())?;
            let score = report
                .selection_score()
                .ok_or_else(|| PipelineError::training("evaluation produced no roc_auc"))?;
            info!(
                model = model.get_name(),
                roc_auc = score,
                metrics = ?report.metrics,
                "evaluated on test partition"
            );
            auc.insert(model.key().to_string(), score);
            reports.push(report);
        }

        let best = self.select(&trained, &auc)?;
        store.save_best_model(best)?;

        self.export_processed(&store, &prepared)?;

        let summary = TrainingSummary {
            best_model: best.key().to_string(),
            auc,
            reports,
            train_rows: prepared.y_train.len(),
            test_rows: prepared.y_test.len(),
            random_state: self.config.random_state,
        };
        store.save_report(&summary)?;

        info!(best = %summary.best_model, auc = ?summary.auc, "training finished");
        Ok(summary)
    }

    fn select<'a>(&self, trained: &'a [Model], auc: &BTreeMap<String, f64>) -> Result<&'a Model> {
        let find = |key: &str| -> Result<(&'a Model, f64)> {
            let model = trained
                .iter()
                .find(|m| m.key() == key)
                .ok_or_else(|| PipelineError::training(format!("model {} was not trained", key)))?;
            let score = auc
                .get(key)
                .copied()
                .ok_or_else(|| PipelineError::training(format!("model {} has no score", key)))?;
            Ok((model, score))
        };

        let (logreg, logreg_auc) = find("logisticregression")?;
        let (forest, forest_auc) = find("randomforest")?;
        Ok(if prefer_forest(logreg_auc, forest_auc) { forest } else { logreg })
    }

    fn export_processed(&self, store: &ArtifactStore, prepared: &PreparedData) -> Result<()> {
        let headers = prepared.scaler.feature_names().to_vec();
        store.export_processed(TRAIN_EXPORT_FILE, &headers, matrix_rows(&prepared.x_train))?;
        store.export_processed(TEST_EXPORT_FILE, &headers, matrix_rows(&prepared.x_test))?;
        Ok(())
    }
}

fn matrix_rows(x: &DenseMatrix<f64>) -> impl Iterator<Item = Vec<f64>> + '_ {
    let (rows, cols) = x.shape();
    (0..rows).map(move |i| (0..cols).map(|j| *x.get((i, j))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_favour_the_forest() {
        assert!(prefer_forest(0.8, 0.8));
        assert!(prefer_forest(0.7, 0.8));
        assert!(!prefer_forest(0.81, 0.8));
    }

    #[test]
    fn candidate_gets_seed_and_overrides() {
        let pipeline = TrainingPipeline::builder()
            .data_path("credit.csv")
            .random_state(9)
            .model_param("random_forest", "n_estimators", "5")
            .model_param("logreg", "alpha", "0.1")
            .build()
            .unwrap();

        let forest = pipeline.candidate("random_forest").unwrap();
        assert_eq!(forest.key(), "randomforest");
        let json = serde_json::to_value(&forest).unwrap();
        assert_eq!(json["seed"], 9);
        assert_eq!(json["n_estimators"], 5);

        let logreg = pipeline.candidate("logreg").unwrap();
        let json = serde_json::to_value(&logreg).unwrap();
        assert_eq!(json["alpha"], 0.1);
    }
}
