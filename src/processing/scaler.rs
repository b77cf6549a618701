use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::{Array, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::DataProcessor;
use crate::error::{PipelineError, Result};

/// Štandardizácia: (x - mean) / std pre každý stĺpec.
/// Stĺpec s nulovým rozptylom má scale 1.0, takže sa iba vycentruje.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler
{
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler
{
    pub fn new(feature_names: Vec<String>) -> Self
    {
        Self {
            feature_names,
            mean: Vec::new(),
            scale: Vec::new(),
        }
    }

    /// Názvy príznakov v poradí, na ktorom bol scaler naučený
    pub fn feature_names(&self) -> &[String]
    {
        &self.feature_names
    }

    pub fn mean(&self) -> &[f64]
    {
        &self.mean
    }

    pub fn scale(&self) -> &[f64]
    {
        &self.scale
    }

    pub fn is_fitted(&self) -> bool
    {
        !self.mean.is_empty()
    }

    fn check_width(&self, cols: usize) -> Result<()>
    {
        if !self.is_fitted() {
            return Err(PipelineError::schema("scaler has not been fitted"));
        }
        if cols != self.mean.len() {
            return Err(PipelineError::schema(format!(
                "scaler expects {} features {:?}, got {}",
                self.mean.len(),
                self.feature_names,
                cols
            )));
        }
        Ok(())
    }

    /// Transformácia jedného riadku (inferencia)
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>>
    {
        self.check_width(row.len())?;
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

impl DataProcessor for StandardScaler
{
    fn get_name(&self) -> &str
    {
        "Standard Scaler"
    }

    fn fit(&mut self, data: &DenseMatrix<f64>) -> Result<()>
    {
        let (rows, cols) = data.shape();
        if rows == 0 {
            return Err(PipelineError::schema("cannot fit scaler on empty data"));
        }
        if cols != self.feature_names.len() {
            return Err(PipelineError::schema(format!(
                "scaler was given {} feature names but data has {} columns",
                self.feature_names.len(),
                cols
            )));
        }

        self.mean = Vec::with_capacity(cols);
        self.scale = Vec::with_capacity(cols);

        for j in 0..cols
        {
            let col: Vec<f64> = (0..rows).map(|i| *data.get((i, j))).collect();
            let mean = col.iter().sum::<f64>() / rows as f64;
            let var = col.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / rows as f64;
            let std = var.sqrt();

            self.mean.push(mean);
            self.scale.push(if std > 0.0 { std } else { 1.0 });
        }
        Ok(())
    }

    fn transform(&self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>>
    {
        let (rows, cols) = data.shape();
        self.check_width(cols)?;

        let mut result = data.clone();
        for j in 0..cols
        {
            for i in 0..rows
            {
                let val = (data.get((i, j)) - self.mean[j]) / self.scale[j];
                result.set((i, j), val);
            }
        }
        Ok(result)
    }
}
