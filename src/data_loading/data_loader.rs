use std::path::Path;

use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::schema::{canonical_name, feature_index};

/// Výsledok načítania dát: príznaky po riadkoch + binárny cieľ
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub headers: Vec<String>,
    pub x_rows: Vec<Vec<f64>>,
    pub y_data: Vec<i32>,
}

impl LoadedData {
    pub fn new(headers: Vec<String>, x_rows: Vec<Vec<f64>>, y_data: Vec<i32>) -> Self {
        Self {
            headers,
            x_rows,
            y_data,
        }
    }

    pub fn num_features(&self) -> usize {
        self.headers.len()
    }

    pub fn num_samples(&self) -> usize {
        self.x_rows.len()
    }

    /// Vyberie zadané stĺpce v zadanom poradí. Chýbajúci stĺpec je chyba schémy.
    pub fn select_features(&self, features: &[&str]) -> Result<LoadedData> {
        let indices = features
            .iter()
            .map(|f| {
                self.headers
                    .iter()
                    .position(|h| *h == canonical_name(f))
                    .ok_or_else(|| {
                        PipelineError::schema(format!(
                            "feature column '{}' not found, available columns: {:?}",
                            f, self.headers
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let x_rows = self
            .x_rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i]).collect())
            .collect();

        Ok(LoadedData::new(
            features.iter().map(|f| canonical_name(f)).collect(),
            x_rows,
            self.y_data.clone(),
        ))
    }

    pub fn to_matrix(&self) -> Result<DenseMatrix<f64>> {
        rows_to_matrix(&self.x_rows)
    }
}

/// Prevod riadkov na smartcore maticu
pub fn rows_to_matrix(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    DenseMatrix::from_2d_vec(&rows.to_vec())
        .map_err(|e| PipelineError::schema(format!("cannot build feature matrix: {}", e)))
}

/// Spoločná konverzia tabuľky (hlavičky + textové bunky) na [`LoadedData`].
///
/// Číta sa iba cieľ a stĺpce kanonickej schémy, ostatné stĺpce (id, mená, ...)
/// sa ignorujú. Riadky s prázdnou bunkou v čítanom stĺpci sa preskočia,
/// cieľ musí byť 0 alebo 1.
pub(crate) fn extract_training_data(
    headers: &[String],
    records: &[Vec<String>],
    target_column: &str,
) -> Result<LoadedData> {
    let headers: Vec<String> = headers.iter().map(|h| canonical_name(h)).collect();
    let target = canonical_name(target_column);

    let target_idx = headers.iter().position(|h| *h == target).ok_or_else(|| {
        PipelineError::schema(format!(
            "target column '{}' not found, available columns: {:?}",
            target_column, headers
        ))
    })?;

    let feature_cols: Vec<usize> = (0..headers.len())
        .filter(|&i| i != target_idx && feature_index(&headers[i]).is_some())
        .collect();
    let ignored = headers.len() - feature_cols.len() - 1;
    if ignored > 0 {
        debug!(ignored, "columns outside the feature schema are ignored");
    }

    let mut x_rows = Vec::with_capacity(records.len());
    let mut y_data = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    'rows: for (row_idx, record) in records.iter().enumerate() {
        if record.len() != headers.len() {
            return Err(PipelineError::schema(format!(
                "row {} has {} columns, expected {}",
                row_idx + 1,
                record.len(),
                headers.len()
            )));
        }

        let Some(target_val) = parse_numeric_value(&record[target_idx], &target, row_idx)? else {
            skipped += 1;
            continue;
        };

        let mut row = Vec::with_capacity(feature_cols.len());
        for &col in &feature_cols {
            let Some(val) = parse_numeric_value(&record[col], &headers[col], row_idx)? else {
                skipped += 1;
                continue 'rows;
            };
            row.push(val);
        }

        x_rows.push(row);
        y_data.push(parse_label(target_val, row_idx)?);
    }

    if skipped > 0 {
        warn!(skipped, "dropped rows with missing values");
    }
    if x_rows.is_empty() {
        return Err(PipelineError::schema("dataset contains no complete rows"));
    }

    let feature_headers: Vec<String> = feature_cols.iter().map(|&i| headers[i].clone()).collect();
    debug!(rows = x_rows.len(), features = ?feature_headers, "dataset extracted");

    Ok(LoadedData::new(feature_headers, x_rows, y_data))
}

/// Prázdna bunka -> `None`, inak číslo (akceptuje aj desatinnú čiarku)
fn parse_numeric_value(val: &str, column: &str, row: usize) -> Result<Option<f64>> {
    let trimmed = val.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
        .map(Some)
        .map_err(|_| {
            PipelineError::schema(format!(
                "value '{}' in column '{}' (row {}) is not a number",
                val,
                column,
                row + 1
            ))
        })
}

fn parse_label(val: f64, row: usize) -> Result<i32> {
    if val == 0.0 {
        Ok(0)
    } else if val == 1.0 {
        Ok(1)
    } else {
        Err(PipelineError::schema(format!(
            "target value {} (row {}) is not binary",
            val,
            row + 1
        )))
    }
}

/// Strategy pattern pre načítanie dát z rôznych zdrojov
pub trait DataLoader {
    /// Názov loadera
    fn get_name(&self) -> &str;

    /// Načíta dáta zo stringu
    fn load_from_string(&mut self, data: &str, target_column: &str) -> Result<LoadedData>;

    /// Získa dostupné stĺpce (headers) z dát
    fn get_available_columns(&self, data: &str) -> Result<Vec<String>>;

    /// Validuje formát dát pred načítaním
    fn validate_format(&self, data: &str) -> Result<()>;

    /// Načíta dáta zo súboru
    fn load_from_path(&mut self, path: &Path, target_column: &str) -> Result<LoadedData> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::unavailable(path, format!("cannot read dataset: {}", e))
        })?;
        self.load_from_string(&contents, target_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn extracts_features_and_binary_target() {
        let headers = vec!["Income".to_string(), "Default".to_string(), "Loan to Income".to_string()];
        let data = extract_training_data(
            &headers,
            &table(&[&["100", "0", "0.5"], &["200", "1", "0,25"]]),
            "Default",
        )
        .unwrap();

        assert_eq!(data.headers, vec!["Income", "Loan_to_Income"]);
        assert_eq!(data.x_rows, vec![vec![100.0, 0.5], vec![200.0, 0.25]]);
        assert_eq!(data.y_data, vec![0, 1]);
    }

    #[test]
    fn skips_rows_with_missing_cells() {
        let headers = vec!["Age".to_string(), "Default".to_string()];
        let data =
            extract_training_data(&headers, &table(&[&["", "0"], &["30", "1"]]), "Default").unwrap();
        assert_eq!(data.num_samples(), 1);
        assert_eq!(data.y_data, vec![1]);
    }

    #[test]
    fn columns_outside_schema_are_ignored() {
        let headers: Vec<String> = ["name", "Age", "note", "Default"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let data = extract_training_data(
            &headers,
            &table(&[&["alice", "30", "", "0"], &["bob", "41", "vip", "1"]]),
            "Default",
        )
        .unwrap();

        assert_eq!(data.headers, vec!["Age"]);
        assert_eq!(data.x_rows, vec![vec![30.0], vec![41.0]]);
        assert_eq!(data.y_data, vec![0, 1]);
    }

    #[test]
    fn missing_target_is_schema_error() {
        let headers = vec!["Age".to_string()];
        let err = extract_training_data(&headers, &table(&[&["30"]]), "Default").unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn non_binary_target_is_rejected() {
        let headers = vec!["Age".to_string(), "Default".to_string()];
        let err = extract_training_data(&headers, &table(&[&["30", "2"]]), "Default").unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn select_features_reorders_and_checks_presence() {
        let data = LoadedData::new(
            vec!["clientid".into(), "Age".into(), "Income".into()],
            vec![vec![1.0, 30.0, 100.0]],
            vec![0],
        );
        let selected = data.select_features(&["Income", "Age"]).unwrap();
        assert_eq!(selected.headers, vec!["Income", "Age"]);
        assert_eq!(selected.x_rows, vec![vec![100.0, 30.0]]);

        assert!(data.select_features(&["Loan"]).is_err());
    }
}
