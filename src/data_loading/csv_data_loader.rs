use super::data_loader::{extract_training_data, DataLoader, LoadedData};
use crate::error::{PipelineError, Result};
use csv::ReaderBuilder;

/// CSV Data Loader - implementácia Strategy pattern pre CSV súbory
pub struct CsvDataLoader;

impl CsvDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Helper pre parsovanie CSV
    fn parse_csv(&self, csv_text: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.is_empty() {
            return Err(PipelineError::schema("CSV has no columns"));
        }

        let records = rdr
            .records()
            .map(|r| r.map(|record| record.iter().map(str::to_string).collect::<Vec<_>>()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if records.is_empty() {
            return Err(PipelineError::schema("CSV contains no data rows"));
        }

        Ok((headers, records))
    }
}

impl DataLoader for CsvDataLoader {
    fn get_name(&self) -> &str {
        "CSV Data Loader"
    }

    fn load_from_string(&mut self, data: &str, target_column: &str) -> Result<LoadedData> {
        self.validate_format(data)?;
        let (headers, records) = self.parse_csv(data)?;
        extract_training_data(&headers, &records, target_column)
    }

    fn get_available_columns(&self, data: &str) -> Result<Vec<String>> {
        let (headers, _) = self.parse_csv(data)?;
        Ok(headers)
    }

    fn validate_format(&self, data: &str) -> Result<()> {
        if data.trim().is_empty() {
            return Err(PipelineError::schema("CSV data is empty"));
        }

        if data.lines().count() < 2 {
            return Err(PipelineError::schema(
                "CSV must contain a header and at least one data row",
            ));
        }

        Ok(())
    }
}

impl Default for CsvDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "clientid,Income,Age,Loan,Loan to Income,Default\n\
                          1,66155.9,59.0,8106.5,0.1225,0\n\
                          2,34415.1,48.1,6564.7,0.1907,1\n";

    #[test]
    fn loads_csv_with_space_header() {
        let mut loader = CsvDataLoader::new();
        let data = loader.load_from_string(SAMPLE, "Default").unwrap();

        assert_eq!(data.headers, vec!["Income", "Age", "Loan", "Loan_to_Income"]);
        assert_eq!(data.num_samples(), 2);
        assert_eq!(data.y_data, vec![0, 1]);
        assert_eq!(data.x_rows[1][3], 0.1907);
    }

    #[test]
    fn text_columns_do_not_break_loading() {
        let csv = "name,Income,Age,Loan,Loan to Income,Default\n\
                   alice,66155.9,59,8106.5,0.1225,0\n\
                   ,34415.1,48.1,6564.7,0.1907,1\n";
        let mut loader = CsvDataLoader::new();
        let data = loader.load_from_string(csv, "Default").unwrap();

        assert_eq!(data.num_samples(), 2);
        assert_eq!(data.num_features(), 4);
        assert_eq!(data.x_rows[0], vec![66155.9, 59.0, 8106.5, 0.1225]);
    }

    #[test]
    fn lists_columns() {
        let loader = CsvDataLoader::new();
        let cols = loader.get_available_columns(SAMPLE).unwrap();
        assert_eq!(cols.len(), 6);
        assert_eq!(cols[4], "Loan to Income");
    }

    #[test]
    fn rejects_header_only_input() {
        let mut loader = CsvDataLoader::new();
        let err = loader.load_from_string("Income,Default\n", "Default").unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn ragged_rows_fail() {
        let mut loader = CsvDataLoader::new();
        let result = loader.load_from_string("Income,Default\n1,0\n2\n", "Default");
        assert!(result.is_err());
    }
}
