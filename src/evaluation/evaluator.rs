use super::metrics::{EvaluationReport, SELECTION_METRIC};
use crate::error::{PipelineError, Result};
use crate::models::label_for;
use smartcore::metrics::{f1, precision, recall, roc_auc_score};

pub struct ModelEvaluator;

impl ModelEvaluator {
    /// Vypočíta confusion matrix pre binárnu klasifikáciu
    /// Vracia (TP, TN, FP, FN)
    fn confusion_matrix(y_true: &[f64], y_pred: &[f64]) -> (f64, f64, f64, f64) {
        let mut tp = 0.0;  // True Positives
        let mut tn = 0.0;  // True Negatives
        let mut fp = 0.0;  // False Positives
        let mut fn_ = 0.0; // False Negatives

        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            let t_val = t.round();
            let p_val = p.round();

            if p_val == 1.0 && t_val == 1.0 { tp += 1.0; }
            else if p_val == 0.0 && t_val == 0.0 { tn += 1.0; }
            else if p_val == 1.0 && t_val == 0.0 { fp += 1.0; }
            else if p_val == 0.0 && t_val == 1.0 { fn_ += 1.0; }
        }

        (tp, tn, fp, fn_)
    }

    /// Plocha pod ROC krivkou. Pri jedinej triede v `y_true` nie je definovaná.
    pub fn auc(y_true: &[i32], probabilities: &[f64]) -> Result<f64> {
        if y_true.len() != probabilities.len() {
            return Err(PipelineError::training(format!(
                "{} labels but {} probabilities",
                y_true.len(),
                probabilities.len()
            )));
        }
        let positives = y_true.iter().filter(|&&l| l == 1).count();
        if positives == 0 || positives == y_true.len() {
            return Err(PipelineError::training(
                "ROC AUC is undefined when the evaluation set has a single class",
            ));
        }

        // smartcore hľadá zhodné skóre medzi susedmi vstupu, preto musí byť vstup zoradený
        let mut pairs: Vec<(f64, f64)> = probabilities
            .iter()
            .zip(y_true)
            .map(|(&p, &l)| (p, l as f64))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (proba_vec, y_true_vec): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        Ok(roc_auc_score(&y_true_vec, &proba_vec))
    }

    /// Vypočíta metriky pre pravdepodobnostný binárny klasifikátor.
    /// Hlavná metrika na výber modelu je `roc_auc`.
    pub fn evaluate_classification(
        y_true: &[i32],
        probabilities: &[f64],
        model_name: &str,
    ) -> Result<EvaluationReport> {
        let mut report = EvaluationReport::new(
            model_name.to_string(),
            "classification".to_string()
        );

        report.add_metric(SELECTION_METRIC, Self::auc(y_true, probabilities)?);

        let y_true_vec: Vec<f64> = y_true.iter().map(|&l| l as f64).collect();
        let y_pred_vec: Vec<f64> = probabilities.iter().map(|&p| label_for(p) as f64).collect();

        // Accuracy
        let correct = y_true_vec.iter().zip(y_pred_vec.iter())
            .filter(|(t, p)| (t.round() - p.round()).abs() < 0.1)
            .count();
        report.add_metric("accuracy".to_string(), correct as f64 / y_true_vec.len() as f64);

        let (tp, tn, fp, fn_) = Self::confusion_matrix(&y_true_vec, &y_pred_vec);

        // Bez predikovaných pozitív smartcore vráti NaN, v reporte by z neho bol null
        let precision_value = if tp + fp > 0.0 { precision(&y_true_vec, &y_pred_vec) } else { 0.0 };
        let f1_value = if tp > 0.0 { f1(&y_true_vec, &y_pred_vec, 1.0) } else { 0.0 };
        report.add_metric("precision".to_string(), precision_value);
        report.add_metric("recall".to_string(), recall(&y_true_vec, &y_pred_vec));
        report.add_metric("f1_score".to_string(), f1_value);

        // Confusion Matrix
        report.add_metric("true_positives".to_string(), tp);
        report.add_metric("true_negatives".to_string(), tn);
        report.add_metric("false_positives".to_string(), fp);
        report.add_metric("false_negatives".to_string(), fn_);

        let specificity = if tn + fp > 0.0 { tn / (tn + fp) } else { 0.0 };
        report.add_metric("specificity".to_string(), specificity);

        // MCC - lepší ako accuracy pre nevyvážené triedy
        let mcc_denom = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        let mcc = if mcc_denom > 0.0 {
            (tp * tn - fp * fn_) / mcc_denom
        } else {
            0.0
        };
        report.add_metric("mcc".to_string(), mcc);

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_ranking_has_auc_one() {
        let auc = ModelEvaluator::auc(&[0, 0, 1, 1], &[0.1, 0.2, 0.7, 0.9]).unwrap();
        assert!((auc - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_ranking_has_auc_zero() {
        let auc = ModelEvaluator::auc(&[1, 1, 0, 0], &[0.1, 0.2, 0.7, 0.9]).unwrap();
        assert!(auc.abs() < 1e-12);
    }

    #[test]
    fn single_class_auc_is_an_error() {
        let err = ModelEvaluator::auc(&[1, 1], &[0.3, 0.6]).unwrap_err();
        assert!(matches!(err, PipelineError::Training(_)));
    }

    #[test]
    fn tied_scores_get_averaged_ranks() {
        // Mann-Whitney: 7 z 9 pozitívno-negatívnych párov, zhody rátajú polovicou
        let auc = ModelEvaluator::auc(&[0, 0, 1, 1, 0, 1], &[0.5, 0.5, 0.5, 1.0, 0.0, 0.5]).unwrap();
        assert!((auc - 7.0 / 9.0).abs() < 1e-12, "auc = {}", auc);

        // hlasy lesa: samé zhody, výsledok nesmie závisieť od poradia vstupu
        let y = [1, 0, 1, 0, 0, 1, 0, 1];
        let p = [0.6, 0.2, 0.2, 0.6, 0.2, 1.0, 0.0, 0.6];
        let forward = ModelEvaluator::auc(&y, &p).unwrap();
        let y_rev: Vec<i32> = y.iter().rev().copied().collect();
        let p_rev: Vec<f64> = p.iter().rev().copied().collect();
        let backward = ModelEvaluator::auc(&y_rev, &p_rev).unwrap();
        assert!((forward - 13.0 / 16.0).abs() < 1e-12, "auc = {}", forward);
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn report_without_predicted_positives_has_no_nan() {
        let report = ModelEvaluator::evaluate_classification(
            &[0, 1, 0, 1],
            &[0.1, 0.4, 0.2, 0.3],
            "Random Forest",
        )
        .unwrap();

        assert_eq!(report.get_metric("f1_score"), Some(0.0));
        assert_eq!(report.get_metric("precision"), Some(0.0));
        assert!(report.metrics.values().all(|v| v.is_finite()));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["metrics"].as_object().unwrap().values().all(|v| v.is_f64()));
    }

    #[test]
    fn report_contains_confusion_counts() {
        let report = ModelEvaluator::evaluate_classification(
            &[0, 0, 1, 1, 1],
            &[0.2, 0.6, 0.9, 0.4, 0.8],
            "Logistic Regression",
        )
        .unwrap();

        assert_eq!(report.get_metric("true_positives"), Some(2.0));
        assert_eq!(report.get_metric("true_negatives"), Some(1.0));
        assert_eq!(report.get_metric("false_positives"), Some(1.0));
        assert_eq!(report.get_metric("false_negatives"), Some(1.0));
        assert_eq!(report.get_metric("accuracy"), Some(0.6));
        assert!(report.get_metric("roc_auc").is_some());
        assert_eq!(report.evaluation_type, "classification");
    }
}
