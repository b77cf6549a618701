use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{PipelineError, Result};

/// Hranica pravdepodobnosti pre triedu 1 (ostro väčšia)
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Binárny klasifikátor s pravdepodobnostným výstupom
pub trait Classifier
{
    fn get_name(&self) -> &str;

    fn get_supported_params(&self) -> Vec<&str>;

    fn set_param(&mut self, key: &str, value: &str) -> Result<()>;

    /// Natrénuje model, `y` obsahuje triedy 0/1
    fn train(&mut self, x: &DenseMatrix<f64>, y: &[i32]) -> Result<()>;

    fn is_trained(&self) -> bool;

    /// Počet vstupných príznakov natrénovaného modelu
    fn n_features(&self) -> Option<usize>;

    /// Pravdepodobnosť triedy 1 pre každý riadok
    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>>;

    /// Trieda pre každý riadok odvodená z [`Classifier::predict_proba`]
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i32>>
    {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| label_for(p))
            .collect())
    }
}

pub fn label_for(probability: f64) -> i32
{
    if probability > DECISION_THRESHOLD { 1 } else { 0 }
}

/// Spoločná kontrola tréningových dát: zhodná dĺžka, iba 0/1, obe triedy prítomné
pub(crate) fn check_binary_target(rows: usize, y: &[i32]) -> Result<()> {
    if rows != y.len() {
        return Err(PipelineError::training(format!(
            "feature matrix has {} rows but {} labels",
            rows,
            y.len()
        )));
    }
    if let Some(bad) = y.iter().find(|&&l| l != 0 && l != 1) {
        return Err(PipelineError::training(format!("label {} is not binary", bad)));
    }
    let positives = y.iter().filter(|&&l| l == 1).count();
    if positives == 0 || positives == y.len() {
        return Err(PipelineError::training(
            "target has a single class, cannot fit a binary classifier",
        ));
    }
    Ok(())
}

pub(crate) fn parse_param<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
{
    value.parse().map_err(|_| {
        PipelineError::schema(format!("invalid value '{}' for parameter '{}'", value, key))
    })
}
