//! Kanonická schéma príznakov, zdieľaná tréningom aj servingom.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Cieľový stĺpec datasetu
pub const TARGET_COLUMN: &str = "Default";

/// Príznaky v poradí, v akom ich vidí scaler aj model
pub const FEATURE_NAMES: [&str; 4] = ["Income", "Age", "Loan", "Loan_to_Income"];

pub const NUM_FEATURES: usize = FEATURE_NAMES.len();

/// Zjednotí názov stĺpca: orezanie a medzery na podčiarkovníky
/// ("Loan to Income" -> "Loan_to_Income").
pub fn canonical_name(name: &str) -> String {
    name.trim().split_whitespace().collect::<Vec<_>>().join("_")
}

/// Index príznaku v kanonickom poradí (akceptuje aj variant s medzerami)
pub fn feature_index(name: &str) -> Option<usize> {
    let canonical = canonical_name(name);
    FEATURE_NAMES.iter().position(|f| *f == canonical)
}

/// Overí, že dodané názvy príznakov sa dajú namapovať na kanonickú schému.
/// Vracia pre každý názov index do [`FEATURE_NAMES`].
pub fn resolve_features<S: AsRef<str>>(names: &[S]) -> Result<Vec<usize>> {
    names
        .iter()
        .map(|name| {
            feature_index(name.as_ref()).ok_or_else(|| {
                PipelineError::schema(format!(
                    "feature '{}' is not part of the schema {:?}",
                    name.as_ref(),
                    FEATURE_NAMES
                ))
            })
        })
        .collect()
}

/// Jeden záznam pre inferenciu
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Income")]
    pub income: f64,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Loan")]
    pub loan: f64,
    #[serde(rename = "Loan_to_Income", alias = "Loan to Income")]
    pub loan_to_income: f64,
}

impl Record {
    pub fn new(income: f64, age: f64, loan: f64, loan_to_income: f64) -> Self {
        Self {
            income,
            age,
            loan,
            loan_to_income,
        }
    }

    /// Hodnoty v kanonickom poradí
    pub fn values(&self) -> [f64; NUM_FEATURES] {
        [self.income, self.age, self.loan, self.loan_to_income]
    }

    /// Hodnota podľa názvu príznaku (oba varianty názvu)
    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|idx| self.values()[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_space_variant() {
        assert_eq!(canonical_name("Loan to Income"), "Loan_to_Income");
        assert_eq!(canonical_name("  Loan   to Income "), "Loan_to_Income");
        assert_eq!(canonical_name("Income"), "Income");
    }

    #[test]
    fn resolves_both_name_variants() {
        let idx = resolve_features(&["Income", "Age", "Loan", "Loan to Income"]).unwrap();
        assert_eq!(idx, vec![0, 1, 2, 3]);

        let shuffled = resolve_features(&["Loan_to_Income", "Income"]).unwrap();
        assert_eq!(shuffled, vec![3, 0]);
    }

    #[test]
    fn unknown_feature_is_schema_error() {
        let err = resolve_features(&["Income", "Salary"]).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn record_accepts_alias_and_serializes_canonically() {
        let r: Record = serde_json::from_str(
            r#"{"Income": 50000, "Age": 35, "Loan": 4000, "Loan to Income": 0.08}"#,
        )
        .unwrap();
        assert_eq!(r.get("Loan_to_Income"), Some(0.08));
        assert_eq!(r.get("Loan to Income"), Some(0.08));

        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["Loan_to_Income"], 0.08);
        assert!(json.get("Loan to Income").is_none());
    }

    #[test]
    fn record_requires_every_field() {
        let missing = serde_json::from_str::<Record>(r#"{"Income": 1, "Age": 2, "Loan": 3}"#);
        assert!(missing.is_err());
    }
}
