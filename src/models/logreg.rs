use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use tracing::debug;

use super::classifier::{check_binary_target, parse_param, Classifier};
use crate::data_loading::data_loader::rows_to_matrix;
use crate::error::{PipelineError, Result};
use crate::processing::oversample_minority;

/// Logistická regresia (smartcore, L-BFGS). Po tréningu si drží iba váhy,
/// pravdepodobnosť je sigmoid(intercept + w·x).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRegWrapper {
    alpha: f64,
    balanced: bool,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogRegWrapper {
    pub fn new() -> Self {
        Self {
            alpha: 0.0,
            balanced: true,
            coefficients: Vec::new(),
            intercept: 0.0,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Default for LogRegWrapper {
    fn default() -> Self {
        Self::new()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogRegWrapper {
    fn get_name(&self) -> &str { "Logistic Regression" }

    fn get_supported_params(&self) -> Vec<&str> {
        vec!["alpha", "balanced"]
    }

    fn set_param(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "alpha" => {
                self.alpha = parse_param(key, value)?;
                Ok(())
            }
            "balanced" => {
                self.balanced = parse_param(key, value)?;
                Ok(())
            }
            _ => Err(PipelineError::schema(format!("unknown parameter '{}'", key))),
        }
    }

    fn train(&mut self, x: &DenseMatrix<f64>, y: &[i32]) -> Result<()> {
        let (rows, cols) = x.shape();
        check_binary_target(rows, y)?;

        let (x_fit, y_fit) = if self.balanced {
            let x_rows: Vec<Vec<f64>> = (0..rows)
                .map(|i| (0..cols).map(|j| *x.get((i, j))).collect())
                .collect();
            let (xb, yb) = oversample_minority(&x_rows, y);
            (rows_to_matrix(&xb)?, yb)
        } else {
            (x.clone(), y.to_vec())
        };
        debug!(rows = y_fit.len(), balanced = self.balanced, "fitting logistic regression");

        let mut params = LogisticRegressionParameters::default();
        params.alpha = self.alpha;

        let model: LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>> =
            LogisticRegression::fit(&x_fit, &y_fit, params)
                .map_err(|e| PipelineError::training(format!("logistic regression: {}", e)))?;

        let coef = model.coefficients();
        self.coefficients = (0..cols).map(|j| *coef.get((0, j))).collect();
        self.intercept = *model.intercept().get((0, 0));

        if self.coefficients.iter().any(|w| !w.is_finite()) || !self.intercept.is_finite() {
            return Err(PipelineError::training("logistic regression diverged"));
        }
        Ok(())
    }

    fn is_trained(&self) -> bool {
        !self.coefficients.is_empty()
    }

    fn n_features(&self) -> Option<usize> {
        self.is_trained().then_some(self.coefficients.len())
    }

    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>> {
        if !self.is_trained() {
            return Err(PipelineError::schema("logistic regression is not trained"));
        }
        let (rows, cols) = x.shape();
        if cols != self.coefficients.len() {
            return Err(PipelineError::schema(format!(
                "model expects {} features, got {}",
                self.coefficients.len(),
                cols
            )));
        }

        Ok((0..rows)
            .map(|i| {
                let z = self
                    .coefficients
                    .iter()
                    .enumerate()
                    .fold(self.intercept, |acc, (j, w)| acc + w * x.get((i, j)));
                sigmoid(z)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlapping() -> (DenseMatrix<f64>, Vec<i32>) {
        let rows: Vec<Vec<f64>> = (0..40)
            .map(|i| {
                let v = i as f64 / 10.0 - 2.0;
                vec![v, (i % 3) as f64 * 0.1]
            })
            .collect();
        // jeden šumový riadok v každej triede, aby dáta neboli lineárne separovateľné
        let y = (0..40)
            .map(|i| if (i >= 28 && i != 35) || i == 5 { 1 } else { 0 })
            .collect();
        (rows_to_matrix(&rows).unwrap(), y)
    }

    #[test]
    fn learns_monotone_relationship() {
        let (x, y) = overlapping();
        let mut model = LogRegWrapper::new();
        model.train(&x, &y).unwrap();

        assert!(model.is_trained());
        assert_eq!(model.n_features(), Some(2));
        assert!(model.coefficients()[0] > 0.0);

        let samples = rows_to_matrix(&[vec![-2.0, 0.0], vec![2.0, 0.0]]).unwrap();
        let p = model.predict_proba(&samples).unwrap();
        assert!(p[0] < p[1]);
        assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(model.predict(&samples).unwrap(), vec![0, 1]);
    }

    #[test]
    fn single_class_fails() {
        let (x, _) = overlapping();
        let mut model = LogRegWrapper::new();
        let err = model.train(&x, &vec![0; 40]).unwrap_err();
        assert!(matches!(err, PipelineError::Training(_)));
    }

    #[test]
    fn untrained_model_cannot_predict() {
        let (x, _) = overlapping();
        assert!(LogRegWrapper::new().predict_proba(&x).is_err());
    }

    #[test]
    fn params_are_validated() {
        let mut model = LogRegWrapper::new();
        model.set_param("alpha", "0.5").unwrap();
        model.set_param("balanced", "false").unwrap();
        assert!(model.set_param("alpha", "abc").is_err());
        assert!(model.set_param("max_depth", "3").is_err());
    }
}
