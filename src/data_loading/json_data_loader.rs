use super::data_loader::{extract_training_data, DataLoader, LoadedData};
use crate::error::{PipelineError, Result};
use serde_json::Value;

/// JSON Data Loader - implementácia Strategy pattern pre JSON súbory
pub struct JsonDataLoader;

impl JsonDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parsuje JSON array of objects formát
    /// Príklad: [{"Income": 1.0, "Age": 2.0, "Default": 0}, ...]
    fn parse_json_array(&self, json_text: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let parsed: Value = serde_json::from_str(json_text)?;

        let array = parsed
            .as_array()
            .ok_or_else(|| PipelineError::schema("JSON must be an array of objects"))?;

        // Hlavičky z prvého objektu
        let first_obj = array
            .first()
            .and_then(Value::as_object)
            .ok_or_else(|| PipelineError::schema("first JSON element must be an object"))?;
        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut records = Vec::with_capacity(array.len());
        for (idx, item) in array.iter().enumerate() {
            let obj = item
                .as_object()
                .ok_or_else(|| PipelineError::schema(format!("element {} is not an object", idx)))?;

            let mut record = Vec::with_capacity(headers.len());
            for header in &headers {
                let value = obj.get(header).ok_or_else(|| {
                    PipelineError::schema(format!("key '{}' missing in element {}", header, idx))
                })?;

                let cell = match value {
                    Value::Number(n) => n.to_string(),
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
                    Value::Null => String::new(),
                    _ => {
                        return Err(PipelineError::schema(format!(
                            "unsupported value type for key '{}'",
                            header
                        )))
                    }
                };
                record.push(cell);
            }
            records.push(record);
        }

        Ok((headers, records))
    }
}

impl DataLoader for JsonDataLoader {
    fn get_name(&self) -> &str {
        "JSON Data Loader"
    }

    fn load_from_string(&mut self, data: &str, target_column: &str) -> Result<LoadedData> {
        self.validate_format(data)?;
        let (headers, records) = self.parse_json_array(data)?;
        extract_training_data(&headers, &records, target_column)
    }

    fn get_available_columns(&self, data: &str) -> Result<Vec<String>> {
        let (headers, _) = self.parse_json_array(data)?;
        Ok(headers)
    }

    fn validate_format(&self, data: &str) -> Result<()> {
        let trimmed = data.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::schema("JSON data is empty"));
        }
        if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
            return Err(PipelineError::schema("JSON must be an array ('[' ... ']')"));
        }
        Ok(())
    }
}

impl Default for JsonDataLoader {
    fn default() -> Self {
        Self::new()
    }
}
