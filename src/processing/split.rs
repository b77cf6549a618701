use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::data_loading::LoadedData;
use crate::error::{PipelineError, Result};

/// Trénovacia a testovacia časť datasetu
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub x_train: Vec<Vec<f64>>,
    pub y_train: Vec<i32>,
    pub x_test: Vec<Vec<f64>>,
    pub y_test: Vec<i32>,
}

/// Stratifikovaný split: pomer tried v oboch častiach zodpovedá celému datasetu.
///
/// Veľkosť testu je `round(test_size * n)` (minimálne 1, maximálne n - 1),
/// kvóty tried sa delia metódou najväčšieho zvyšku. Rovnaký seed dá rovnaký split.
pub fn train_test_split(data: &LoadedData, test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    let n = data.num_samples();
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::schema(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }
    if n < 2 {
        return Err(PipelineError::schema("need at least two rows to split"));
    }
    if data.y_data.len() != n {
        return Err(PipelineError::schema(format!(
            "feature rows ({}) and labels ({}) differ in length",
            n,
            data.y_data.len()
        )));
    }

    let n_test = ((test_size * n as f64).round() as usize).clamp(1, n - 1);

    // Indexy riadkov podľa triedy (BTreeMap kvôli deterministickému poradiu)
    let mut by_class: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, label) in data.y_data.iter().enumerate() {
        by_class.entry(*label).or_default().push(idx);
    }

    let quotas = allocate_quotas(&by_class, n_test, n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx = Vec::with_capacity(n - n_test);
    let mut test_idx = Vec::with_capacity(n_test);

    for (label, indices) in by_class.iter_mut() {
        indices.shuffle(&mut rng);
        let take = quotas[label];
        test_idx.extend_from_slice(&indices[..take]);
        train_idx.extend_from_slice(&indices[take..]);
    }

    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    let pick_x = |idx: &[usize]| -> Vec<Vec<f64>> {
        idx.iter().map(|&i| data.x_rows[i].clone()).collect()
    };
    let pick_y = |idx: &[usize]| -> Vec<i32> { idx.iter().map(|&i| data.y_data[i]).collect() };

    Ok(TrainTestSplit {
        x_train: pick_x(&train_idx),
        y_train: pick_y(&train_idx),
        x_test: pick_x(&test_idx),
        y_test: pick_y(&test_idx),
    })
}

/// Najväčší zvyšok: každá trieda dostane floor(podiel) a zvyšné miesta idú
/// triedam s najväčšou desatinnou časťou.
fn allocate_quotas(by_class: &BTreeMap<i32, Vec<usize>>, n_test: usize, n: usize) -> BTreeMap<i32, usize> {
    let mut quotas = BTreeMap::new();
    let mut remainders = Vec::with_capacity(by_class.len());
    let mut assigned = 0usize;

    for (label, indices) in by_class {
        let exact = indices.len() as f64 * n_test as f64 / n as f64;
        let base = exact.floor() as usize;
        quotas.insert(*label, base);
        assigned += base;
        remainders.push((*label, exact - base as f64));
    }

    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (label, _) in remainders.into_iter().take(n_test.saturating_sub(assigned)) {
        if let Some(q) = quotas.get_mut(&label) {
            *q += 1;
        }
    }
    quotas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize, positives: usize) -> LoadedData {
        let x_rows = (0..n).map(|i| vec![i as f64]).collect();
        let y_data = (0..n).map(|i| if i < positives { 1 } else { 0 }).collect();
        LoadedData::new(vec!["x".into()], x_rows, y_data)
    }

    fn positive_share(y: &[i32]) -> f64 {
        y.iter().filter(|&&l| l == 1).count() as f64 / y.len() as f64
    }

    #[test]
    fn sizes_follow_test_fraction() {
        for &n in &[10usize, 37, 100, 2000] {
            let split = train_test_split(&dataset(n, n / 7 + 1), 0.2, 42).unwrap();
            let n_test = (0.2 * n as f64).round() as usize;
            assert_eq!(split.x_test.len(), n_test, "n = {}", n);
            assert_eq!(split.x_train.len(), n - n_test, "n = {}", n);
            assert_eq!(split.y_train.len(), split.x_train.len());
            assert_eq!(split.y_test.len(), split.x_test.len());
        }
    }

    #[test]
    fn class_proportions_are_preserved() {
        let data = dataset(1000, 142);
        let split = train_test_split(&data, 0.2, 7).unwrap();
        let overall = positive_share(&data.y_data);

        // do jedného riadku od celkového podielu
        assert!((positive_share(&split.y_test) - overall).abs() <= 1.0 / 200.0);
        assert!((positive_share(&split.y_train) - overall).abs() <= 1.0 / 800.0);
    }

    #[test]
    fn partitions_cover_every_row_once() {
        let data = dataset(53, 11);
        let split = train_test_split(&data, 0.25, 3).unwrap();
        let mut seen: Vec<i64> = split
            .x_train
            .iter()
            .chain(split.x_test.iter())
            .map(|r| r[0] as i64)
            .collect();
        seen.sort();
        assert_eq!(seen, (0..53).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        let data = dataset(120, 30);
        assert_eq!(
            train_test_split(&data, 0.2, 99).unwrap(),
            train_test_split(&data, 0.2, 99).unwrap()
        );
        assert_ne!(
            train_test_split(&data, 0.2, 99).unwrap(),
            train_test_split(&data, 0.2, 100).unwrap()
        );
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(train_test_split(&dataset(10, 5), 0.0, 1).is_err());
        assert!(train_test_split(&dataset(10, 5), 1.0, 1).is_err());
        assert!(train_test_split(&dataset(1, 1), 0.2, 1).is_err());
    }
}
