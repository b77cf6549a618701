use std::path::Path;

use super::csv_data_loader::CsvDataLoader;
use super::data_loader::DataLoader;
use super::json_data_loader::JsonDataLoader;
use crate::error::{PipelineError, Result};

/// Factory pre vytváranie data loaderov podľa typu
pub struct DataLoaderFactory;

impl DataLoaderFactory {
    /// Vytvorí loader na základe typu
    pub fn create(loader_type: &str) -> Result<Box<dyn DataLoader>> {
        match loader_type.to_lowercase().as_str() {
            "csv" => Ok(Box::new(CsvDataLoader::new())),
            "json" => Ok(Box::new(JsonDataLoader::new())),
            _ => Err(PipelineError::schema(format!(
                "unknown loader type: {}",
                loader_type
            ))),
        }
    }

    /// Vyberie loader podľa prípony súboru, bez prípony predpokladá CSV
    pub fn create_for_path(path: &Path) -> Result<Box<dyn DataLoader>> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::create(ext),
            None => Ok(Box::new(CsvDataLoader::new())),
        }
    }

    /// Vráti zoznam všetkých podporovaných formátov
    pub fn available_formats() -> Vec<&'static str> {
        vec!["csv", "json"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_loader_by_extension() {
        let csv = DataLoaderFactory::create_for_path(Path::new("data/credit.CSV")).unwrap();
        assert_eq!(csv.get_name(), "CSV Data Loader");

        let json = DataLoaderFactory::create_for_path(Path::new("data/credit.json")).unwrap();
        assert_eq!(json.get_name(), "JSON Data Loader");

        assert!(DataLoaderFactory::create_for_path(Path::new("data/credit.parquet")).is_err());
    }
}
