use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::{Classifier, LogRegWrapper, RandomForestWrapper};
use crate::error::{PipelineError, Result};

/// Natrénovateľný / natrénovaný model. Na disku ako JSON s tagom `kind`.
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    LogisticRegression(LogRegWrapper),
    RandomForest(RandomForestWrapper),
}

impl Model {
    /// Kľúč modelu, zároveň názov súboru artefaktu
    pub fn key(&self) -> &'static str {
        match self {
            Model::LogisticRegression(_) => "logisticregression",
            Model::RandomForest(_) => "randomforest",
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            Model::LogisticRegression(m) => m,
            Model::RandomForest(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Classifier {
        match self {
            Model::LogisticRegression(m) => m,
            Model::RandomForest(m) => m,
        }
    }
}

impl Classifier for Model {
    fn get_name(&self) -> &str {
        self.inner().get_name()
    }

    fn get_supported_params(&self) -> Vec<&str> {
        self.inner().get_supported_params()
    }

    fn set_param(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner_mut().set_param(key, value)
    }

    fn train(&mut self, x: &DenseMatrix<f64>, y: &[i32]) -> Result<()> {
        self.inner_mut().train(x, y)
    }

    fn is_trained(&self) -> bool {
        self.inner().is_trained()
    }

    fn n_features(&self) -> Option<usize> {
        self.inner().n_features()
    }

    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>> {
        self.inner().predict_proba(x)
    }
}

/// Factory pre vytváranie modelov podľa názvu
pub struct ModelFactory;

impl ModelFactory {
    /// Vytvorí model na základe názvu
    pub fn create(model_type: &str) -> Result<Model> {
        match model_type {
            "logreg" | "logistic_regression" | "logisticregression" => {
                Ok(Model::LogisticRegression(LogRegWrapper::new()))
            }
            "forest" | "random_forest" | "randomforest" => {
                Ok(Model::RandomForest(RandomForestWrapper::new()))
            }
            _ => Err(PipelineError::schema(format!("unknown model: {}", model_type))),
        }
    }

    /// Vráti zoznam všetkých dostupných modelov
    pub fn available_models() -> Vec<&'static str> {
        vec!["logreg", "random_forest"]
    }

    /// Vráti popis modelu
    pub fn get_model_description(model_type: &str) -> Option<&'static str> {
        match model_type {
            "logreg" => Some("Logistic regression with class-balanced resampling"),
            "random_forest" => Some("Bagged decision trees with class-balanced bootstrap"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_every_listed_model() {
        for name in ModelFactory::available_models() {
            let model = ModelFactory::create(name).unwrap();
            assert!(!model.is_trained());
            assert!(ModelFactory::get_model_description(name).is_some());
        }
        assert!(ModelFactory::create("knn").is_err());
    }

    #[test]
    fn keys_match_artifact_names() {
        assert_eq!(ModelFactory::create("logreg").unwrap().key(), "logisticregression");
        assert_eq!(ModelFactory::create("random_forest").unwrap().key(), "randomforest");
    }

    #[test]
    fn params_are_forwarded() {
        let mut model = ModelFactory::create("random_forest").unwrap();
        assert!(model.get_supported_params().contains(&"n_estimators"));
        model.set_param("n_estimators", "3").unwrap();
        assert!(model.set_param("alpha", "1").is_err());
    }

    #[test]
    fn serialized_form_is_tagged() {
        let model = ModelFactory::create("logreg").unwrap();
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["kind"], "logistic_regression");
    }
}
