use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::models::Model;
use crate::processing::StandardScaler;

pub const MODELS_DIR: &str = "models";
pub const PROCESSED_DIR: &str = "data/processed";
pub const BEST_MODEL_FILE: &str = "best_model.json";
pub const SCALER_FILE: &str = "scaler_standard.json";
pub const REPORT_FILE: &str = "training_report.json";
pub const TRAIN_EXPORT_FILE: &str = "train_processed.csv";
pub const TEST_EXPORT_FILE: &str = "test_processed.csv";

/// Rozloženie artefaktov pod jedným koreňovým adresárom
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join(MODELS_DIR)
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join(PROCESSED_DIR)
    }

    /// Súbor jednotlivého modelu podľa jeho kľúča (`logisticregression`, `randomforest`)
    pub fn model_path(&self, key: &str) -> PathBuf {
        self.models_dir().join(format!("{}.json", key))
    }

    pub fn best_model_path(&self) -> PathBuf {
        self.models_dir().join(BEST_MODEL_FILE)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.models_dir().join(SCALER_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.models_dir().join(REPORT_FILE)
    }

    pub fn save_model(&self, model: &Model) -> Result<PathBuf> {
        let path = self.model_path(model.key());
        write_json(&path, model)?;
        Ok(path)
    }

    pub fn save_best_model(&self, model: &Model) -> Result<PathBuf> {
        let path = self.best_model_path();
        write_json(&path, model)?;
        Ok(path)
    }

    pub fn save_scaler(&self, scaler: &StandardScaler) -> Result<PathBuf> {
        let path = self.scaler_path();
        write_json(&path, scaler)?;
        Ok(path)
    }

    pub fn save_report<T: Serialize>(&self, report: &T) -> Result<PathBuf> {
        let path = self.report_path();
        write_json(&path, report)?;
        Ok(path)
    }

    pub fn load_model(&self, path: &Path) -> Result<Model> {
        read_json(path)
    }

    pub fn load_best_model(&self) -> Result<Model> {
        read_json(&self.best_model_path())
    }

    pub fn load_scaler(&self) -> Result<StandardScaler> {
        read_json(&self.scaler_path())
    }

    /// Export škálovaných príznakov do CSV (bez cieľového stĺpca)
    pub fn export_processed(
        &self,
        file_name: &str,
        headers: &[String],
        rows: impl IntoIterator<Item = Vec<f64>>,
    ) -> Result<PathBuf> {
        let dir = self.processed_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join(file_name);

        let mut wtr = csv::Writer::from_path(&path)?;
        wtr.write_record(headers)?;
        let mut count = 0usize;
        for row in rows {
            wtr.serialize(row)?;
            count += 1;
        }
        wtr.flush()?;

        info!(path = %path.display(), rows = count, "processed data exported");
        Ok(path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    debug!(path = %path.display(), "artifact written");
    Ok(())
}

/// Chýbajúci aj poškodený artefakt je `ResourceUnavailable`
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .map_err(|e| PipelineError::unavailable(path, format!("cannot open artifact: {}", e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| PipelineError::unavailable(path, format!("cannot decode artifact: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::DataProcessor;
    use crate::data_loading::data_loader::rows_to_matrix;
    use tempfile::TempDir;

    #[test]
    fn layout_matches_expected_file_names() {
        let store = ArtifactStore::new("/srv/out");
        assert_eq!(store.best_model_path(), PathBuf::from("/srv/out/models/best_model.json"));
        assert_eq!(store.scaler_path(), PathBuf::from("/srv/out/models/scaler_standard.json"));
        assert_eq!(
            store.model_path("randomforest"),
            PathBuf::from("/srv/out/models/randomforest.json")
        );
        assert_eq!(store.processed_dir(), PathBuf::from("/srv/out/data/processed"));
    }

    #[test]
    fn scaler_round_trips_exactly() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        let x = rows_to_matrix(&[vec![0.1, 1e-7], vec![0.7, 3.3e5], vec![1.9, 42.0]]).unwrap();
        let mut scaler = StandardScaler::new(vec!["a".into(), "b".into()]);
        scaler.fit(&x).unwrap();

        store.save_scaler(&scaler).unwrap();
        assert_eq!(store.load_scaler().unwrap(), scaler);
    }

    #[test]
    fn missing_artifact_is_resource_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        let err = store.load_best_model().err().unwrap();
        assert!(matches!(err, PipelineError::ResourceUnavailable { .. }));
    }

    #[test]
    fn corrupt_artifact_is_resource_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        fs::create_dir_all(store.models_dir()).unwrap();
        fs::write(store.scaler_path(), b"{not json").unwrap();
        let err = store.load_scaler().unwrap_err();
        assert!(matches!(err, PipelineError::ResourceUnavailable { .. }));
    }

    #[test]
    fn exports_processed_rows_with_header() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        let path = store
            .export_processed(
                TRAIN_EXPORT_FILE,
                &["Income".to_string(), "Age".to_string()],
                vec![vec![0.5, -1.0], vec![1.25, 2.0]],
            )
            .unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text, "Income,Age\n0.5,-1.0\n1.25,2.0\n");
    }
}
