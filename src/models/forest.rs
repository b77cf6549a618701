use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};
use tracing::debug;

use super::classifier::{check_binary_target, parse_param, Classifier};
use crate::data_loading::data_loader::rows_to_matrix;
use crate::error::{PipelineError, Result};

type Tree = DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Random forest: stromy zo smartcore, každý na vlastnej bootstrap vzorke.
/// Pravdepodobnosť triedy 1 je podiel stromov, ktoré za ňu hlasujú.
#[derive(Serialize, Deserialize)]
pub struct RandomForestWrapper
{
    n_estimators: usize,
    max_depth: Option<u16>,
    min_samples_split: usize,
    balanced: bool,
    seed: u64,
    #[serde(default)]
    n_features: usize,
    trees: Vec<Tree>,
}

impl RandomForestWrapper
{
    pub fn new() -> Self
    {
        Self
        {  //Default
            n_estimators: 200,
            max_depth: None,
            min_samples_split: 2,
            balanced: true,
            seed: 42,
            n_features: 0,
            trees: Vec::new(),
        }
    }

    pub fn n_trees(&self) -> usize
    {
        self.trees.len()
    }

    /// Indexy jednej bootstrap vzorky (s opakovaním).
    /// Pri `balanced` dostane každá trieda rovnaký počet ťahov.
    fn bootstrap_indices(&self, y: &[i32], rng: &mut StdRng) -> Vec<usize>
    {
        let n = y.len();
        if !self.balanced {
            let all: Vec<usize> = (0..n).collect();
            return (0..n).filter_map(|_| all.choose(rng).copied()).collect();
        }

        let negatives: Vec<usize> = (0..n).filter(|&i| y[i] == 0).collect();
        let positives: Vec<usize> = (0..n).filter(|&i| y[i] == 1).collect();
        let per_class = (n / 2).max(1);

        let mut sample = Vec::with_capacity(per_class * 2);
        for pool in [&negatives, &positives]
        {
            sample.extend((0..per_class).filter_map(|_| pool.choose(rng).copied()));
        }
        sample
    }
}

impl Default for RandomForestWrapper
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Classifier for RandomForestWrapper
{
    fn get_name(&self) -> &str
    {
        "Random Forest"
    }

    fn get_supported_params(&self) -> Vec<&str>
    {
        vec!["n_estimators", "max_depth", "min_samples_split", "balanced", "seed"]
    }

    fn set_param(&mut self, key: &str, value: &str) -> Result<()>
    {
        match key
        {
            "n_estimators" =>
            {
                let n: usize = parse_param(key, value)?;
                if n == 0 {
                    return Err(PipelineError::schema("n_estimators must be positive"));
                }
                self.n_estimators = n;
                Ok(())
            }
            "max_depth" =>
            {
                self.max_depth = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(parse_param(key, value)?)
                };
                Ok(())
            }
            "min_samples_split" =>
            {
                self.min_samples_split = parse_param(key, value)?;
                Ok(())
            }
            "balanced" =>
            {
                self.balanced = parse_param(key, value)?;
                Ok(())
            }
            "seed" =>
            {
                self.seed = parse_param(key, value)?;
                Ok(())
            }
            _ => Err(PipelineError::schema(format!("unknown parameter '{}'", key))),
        }
    }

    fn train(&mut self, x: &DenseMatrix<f64>, y: &[i32]) -> Result<()>
    {
        let (rows, cols) = x.shape();
        check_binary_target(rows, y)?;

        let x_rows: Vec<Vec<f64>> = (0..rows)
            .map(|i| (0..cols).map(|j| *x.get((i, j))).collect())
            .collect();

        let mut params = DecisionTreeClassifierParameters::default();
        params.max_depth = self.max_depth;
        params.min_samples_split = self.min_samples_split;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut trees = Vec::with_capacity(self.n_estimators);

        for t in 0..self.n_estimators
        {
            let sample = self.bootstrap_indices(y, &mut rng);
            let xs: Vec<Vec<f64>> = sample.iter().map(|&i| x_rows[i].clone()).collect();
            let ys: Vec<i32> = sample.iter().map(|&i| y[i]).collect();

            let tree = Tree::fit(&rows_to_matrix(&xs)?, &ys, params.clone()).map_err(|e| {
                PipelineError::training(format!("random forest tree {}: {}", t, e))
            })?;
            trees.push(tree);
        }

        debug!(trees = trees.len(), balanced = self.balanced, "random forest fitted");
        self.n_features = cols;
        self.trees = trees;
        Ok(())
    }

    fn is_trained(&self) -> bool
    {
        !self.trees.is_empty()
    }

    fn n_features(&self) -> Option<usize>
    {
        (self.is_trained() && self.n_features > 0).then_some(self.n_features)
    }

    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>>
    {
        if !self.is_trained() {
            return Err(PipelineError::schema("random forest is not trained"));
        }

        let (rows, cols) = x.shape();
        if cols != self.n_features {
            return Err(PipelineError::schema(format!(
                "random forest expects {} features, got {}",
                self.n_features, cols
            )));
        }
        let mut votes = vec![0usize; rows];
        for tree in &self.trees
        {
            let pred = tree
                .predict(x)
                .map_err(|e| PipelineError::schema(format!("tree prediction failed: {}", e)))?;
            for (v, label) in votes.iter_mut().zip(pred) {
                if label == 1 {
                    *v += 1;
                }
            }
        }

        let n = self.trees.len() as f64;
        Ok(votes.into_iter().map(|v| v as f64 / n).collect())
    }
}
