use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

use super::{train_test_split, DataProcessor, StandardScaler};
use crate::data_loading::data_loader::rows_to_matrix;
use crate::data_loading::LoadedData;
use crate::error::Result;

/// Výstup preprocessingu: škálované časti, ich triedy a naučený scaler
pub struct PreparedData {
    pub x_train: DenseMatrix<f64>,
    pub y_train: Vec<i32>,
    pub x_test: DenseMatrix<f64>,
    pub y_test: Vec<i32>,
    pub scaler: StandardScaler,
}

/// Stratifikovaný split a štandardizácia. Scaler sa učí iba na trénovacej
/// časti a rovnaká transformácia sa aplikuje na test.
pub fn split_and_scale(data: &LoadedData, test_size: f64, seed: u64) -> Result<PreparedData> {
    let split = train_test_split(data, test_size, seed)?;
    info!(
        train_rows = split.x_train.len(),
        test_rows = split.x_test.len(),
        test_size,
        seed,
        "stratified split done"
    );

    let mut scaler = StandardScaler::new(data.headers.clone());
    let x_train = scaler.fit_transform(&rows_to_matrix(&split.x_train)?)?;
    let x_test = scaler.transform(&rows_to_matrix(&split.x_test)?)?;

    Ok(PreparedData {
        x_train,
        y_train: split.y_train,
        x_test,
        y_test: split.y_test,
        scaler,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcore::linalg::basic::arrays::Array;

    #[test]
    fn test_partition_uses_train_statistics() {
        let x_rows: Vec<Vec<f64>> = (0..100).map(|i| vec![i as f64, (i * i) as f64]).collect();
        let y_data = (0..100).map(|i| (i % 4 == 0) as i32).collect();
        let data = LoadedData::new(vec!["a".into(), "b".into()], x_rows, y_data);

        let prepared = split_and_scale(&data, 0.2, 1).unwrap();
        assert_eq!(prepared.x_train.shape(), (80, 2));
        assert_eq!(prepared.x_test.shape(), (20, 2));
        assert_eq!(prepared.scaler.feature_names(), &["a".to_string(), "b".to_string()]);

        // scaler pozná iba štatistiky tréningovej časti
        let split = train_test_split(&data, 0.2, 1).unwrap();
        let train_mean = split.x_train.iter().map(|r| r[0]).sum::<f64>() / 80.0;
        assert!((prepared.scaler.mean()[0] - train_mean).abs() < 1e-9);

        let expected = prepared.scaler.transform_row(&split.x_test[0]).unwrap();
        assert_eq!(expected[0], *prepared.x_test.get((0, 0)));
        assert_eq!(expected[1], *prepared.x_test.get((0, 1)));
    }
}
