// somnus-core/src/domain/modeling/mod.rs
//
// Baseline stress model: preprocessing + ridge, K-fold CV on the train side,
// final fit and held-out evaluation.

pub mod linalg;
pub mod metrics;
pub mod preprocess;
pub mod ridge;

pub use metrics::{mean_squared_error, r2_score};
pub use preprocess::Preprocessor;
pub use ridge::Ridge;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::partition::SplitView;
use crate::domain::table::Table;

pub const DEFAULT_ALPHA: f64 = 1.0;
pub const DEFAULT_CV_FOLDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ModelConfig {
    #[validate(range(min = 0.0, message = "alpha must be non-negative"))]
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    #[validate(range(min = 2, message = "cross-validation needs at least 2 folds"))]
    #[serde(default = "default_cv_folds")]
    pub cv_folds: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            cv_folds: DEFAULT_CV_FOLDS,
        }
    }
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}
fn default_cv_folds() -> usize {
    DEFAULT_CV_FOLDS
}

/// Fitted preprocessing + ridge pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressModel {
    pub preprocessor: Preprocessor,
    pub ridge: Ridge,
}

impl StressModel {
    pub fn fit(table: &Table, alpha: f64) -> Result<Self, DomainError> {
        let preprocessor = Preprocessor::fit(table)?;
        let x = preprocessor.transform(table)?;
        let y = preprocess::target(table)?;
        let ridge = Ridge::fit(&x, &y, alpha)?;
        Ok(Self {
            preprocessor,
            ridge,
        })
    }

    pub fn predict(&self, table: &Table) -> Result<Vec<f64>, DomainError> {
        let x = self.preprocessor.transform(table)?;
        Ok(self.ridge.predict(&x))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldScore {
    pub fold: usize,
    pub train_mse: f64,
    pub test_mse: f64,
    pub train_r2: f64,
    pub test_r2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvSummary {
    pub train_mse: f64,
    pub test_mse: f64,
    pub train_r2: f64,
    pub test_r2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestMetrics {
    pub rows: usize,
    pub mse: f64,
    pub r2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub actual: f64,
    pub predicted: f64,
    pub residual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub train_rows: usize,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub folds: Vec<FoldScore>,
    pub cv_mean: CvSummary,
    /// Absent when the input carried no held-out rows.
    pub test: Option<TestMetrics>,
    pub predictions: Vec<Prediction>,
}

/// Unshuffled K-fold: the first `n % k` folds get one extra row.
/// Returns `(train_indices, test_indices)` per fold.
pub fn kfold(rows: usize, folds: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>, DomainError> {
    if folds < 2 || rows < folds {
        return Err(DomainError::InsufficientRows {
            needed: folds.max(2),
            actual: rows,
        });
    }
    let base = rows / folds;
    let extra = rows % folds;

    let mut start = 0;
    let mut splits = Vec::with_capacity(folds);
    for fold in 0..folds {
        let size = base + usize::from(fold < extra);
        let end = start + size;
        let test: Vec<usize> = (start..end).collect();
        let train: Vec<usize> = (0..start).chain(end..rows).collect();
        splits.push((train, test));
        start = end;
    }
    Ok(splits)
}

/// K-fold cross-validation of the full pipeline (preprocessing refit per fold).
pub fn cross_validate(table: &Table, config: &ModelConfig) -> Result<Vec<FoldScore>, DomainError> {
    let y = preprocess::target(table)?;
    kfold(table.len(), config.cv_folds)?
        .into_iter()
        .enumerate()
        .map(|(fold, (train_idx, test_idx))| {
            let train = table.select_rows(&train_idx);
            let test = table.select_rows(&test_idx);
            let model = StressModel::fit(&train, config.alpha)?;

            let y_train: Vec<f64> = train_idx.iter().map(|&i| y[i]).collect();
            let y_test: Vec<f64> = test_idx.iter().map(|&i| y[i]).collect();
            let p_train = model.predict(&train)?;
            let p_test = model.predict(&test)?;

            let score = FoldScore {
                fold: fold + 1,
                train_mse: mean_squared_error(&y_train, &p_train).unwrap_or(f64::NAN),
                test_mse: mean_squared_error(&y_test, &p_test).unwrap_or(f64::NAN),
                train_r2: r2_score(&y_train, &p_train).unwrap_or(f64::NAN),
                test_r2: r2_score(&y_test, &p_test).unwrap_or(f64::NAN),
            };
            debug!(?score, "Cross-validation fold scored");
            Ok(score)
        })
        .collect()
}

fn summarize(folds: &[FoldScore]) -> CvSummary {
    let n = folds.len().max(1) as f64;
    let avg = |f: fn(&FoldScore) -> f64| folds.iter().map(f).sum::<f64>() / n;
    CvSummary {
        train_mse: avg(|s: &FoldScore| s.train_mse),
        test_mse: avg(|s: &FoldScore| s.test_mse),
        train_r2: avg(|s: &FoldScore| s.train_r2),
        test_r2: avg(|s: &FoldScore| s.test_r2),
    }
}

/// Cross-validates on the train side, fits on all of it, and scores the
/// held-out side when there is one.
pub fn evaluate(view: &SplitView, config: &ModelConfig) -> Result<ModelReport, DomainError> {
    let train = view.training();
    if !view.is_partitioned() {
        warn!("No 'train' column: fitting on the whole dataset, held-out evaluation skipped");
    }

    let folds = cross_validate(train, config)?;
    let cv_mean = summarize(&folds);
    info!(
        folds = folds.len(),
        cv_test_mse = cv_mean.test_mse,
        cv_test_r2 = cv_mean.test_r2,
        "Cross-validation finished"
    );

    let model = StressModel::fit(train, config.alpha)?;

    let (test, predictions) = match view.held_out().filter(|t| !t.is_empty()) {
        Some(held_out) => {
            let actual = preprocess::target(held_out)?;
            let predicted = model.predict(held_out)?;
            let metrics = TestMetrics {
                rows: held_out.len(),
                mse: mean_squared_error(&actual, &predicted).unwrap_or(f64::NAN),
                r2: r2_score(&actual, &predicted).unwrap_or(f64::NAN),
            };
            info!(mse = metrics.mse, r2 = metrics.r2, "Held-out evaluation");
            let predictions = actual
                .into_iter()
                .zip(predicted)
                .map(|(actual, predicted)| Prediction {
                    actual,
                    predicted,
                    residual: actual - predicted,
                })
                .collect();
            (Some(metrics), predictions)
        }
        None => (None, Vec::new()),
    };

    Ok(ModelReport {
        train_rows: train.len(),
        feature_names: model.preprocessor.feature_names(),
        coefficients: model.ridge.coefficients.clone(),
        intercept: model.ridge.intercept,
        folds,
        cv_mean,
        test,
        predictions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cleaning::{DISORDER_COLUMN, TRAIN_COLUMN};
    use crate::domain::exploration::{DURATION_COLUMN, QUALITY_COLUMN, STRESS_COLUMN};
    use crate::domain::table::Column;

    /// Stress is an exact linear function of the features, so a lightly
    /// regularized fit scores close to perfectly.
    fn synthetic(rows: usize) -> Result<Table, DomainError> {
        let disorders = ["No Disorder", "Insomnia", "Sleep Apnea"];
        let duration: Vec<f64> = (0..rows).map(|i| 5.0 + (i % 7) as f64 * 0.5).collect();
        let quality: Vec<i64> = (0..rows).map(|i| 4 + (i % 5) as i64).collect();
        let disorder: Vec<&str> = (0..rows).map(|i| disorders[i % 3]).collect();
        let stress: Vec<f64> = (0..rows)
            .map(|i| 12.0 - duration[i] - 0.2 * quality[i] as f64 + if i % 3 == 1 { 1.0 } else { 0.0 })
            .collect();
        let train: Vec<i64> = (0..rows).map(|i| i64::from(i % 5 != 0)).collect();
        Table::new(vec![
            Column::from_values("person_id", (0..rows as i64).collect::<Vec<_>>()),
            Column::from_values(DURATION_COLUMN, duration),
            Column::from_values(QUALITY_COLUMN, quality),
            Column::from_values(DISORDER_COLUMN, disorder),
            Column::from_values(STRESS_COLUMN, stress),
            Column::from_values(TRAIN_COLUMN, train),
        ])
    }

    #[test]
    fn test_kfold_sizes() -> Result<(), DomainError> {
        let folds = kfold(12, 5)?;
        let sizes: Vec<usize> = folds.iter().map(|(_, test)| test.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2, 2]);
        assert_eq!(folds[0].1, vec![0, 1, 2]);
        assert_eq!(folds[1].0.len(), 9);
        // every row is tested exactly once
        let mut all: Vec<usize> = folds.into_iter().flat_map(|(_, t)| t).collect();
        all.sort_unstable();
        assert_eq!(all, (0..12).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_kfold_needs_enough_rows() {
        assert_eq!(
            kfold(3, 5),
            Err(DomainError::InsufficientRows {
                needed: 5,
                actual: 3
            })
        );
    }

    #[test]
    fn test_evaluate_partitioned() -> Result<(), DomainError> {
        let view = SplitView::of(&synthetic(60)?)?;
        let config = ModelConfig {
            alpha: 1e-6,
            ..ModelConfig::default()
        };
        let report = evaluate(&view, &config)?;

        assert_eq!(report.train_rows, 48);
        assert_eq!(report.folds.len(), 5);
        assert_eq!(report.feature_names.len(), 5);
        let test = report.test.as_ref().map(|t| (t.rows, t.r2));
        assert!(test.is_some_and(|(rows, r2)| rows == 12 && r2 > 0.99));
        assert_eq!(report.predictions.len(), 12);
        assert!(report.cv_mean.test_r2 > 0.99);
        Ok(())
    }

    #[test]
    fn test_evaluate_without_split_column() -> Result<(), DomainError> {
        let table = Table::new(
            synthetic(20)?
                .into_columns()
                .into_iter()
                .filter(|c| c.name() != TRAIN_COLUMN)
                .collect(),
        )?;
        let report = evaluate(&SplitView::of(&table)?, &ModelConfig::default())?;
        assert_eq!(report.train_rows, 20);
        assert!(report.test.is_none());
        assert!(report.predictions.is_empty());
        Ok(())
    }

    #[test]
    fn test_evaluate_too_few_training_rows() -> Result<(), DomainError> {
        let view = SplitView::of(&synthetic(4)?)?;
        assert!(matches!(
            evaluate(&view, &ModelConfig::default()),
            Err(DomainError::InsufficientRows { needed: 5, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_config_validation() {
        assert!(ModelConfig::default().validate().is_ok());
        let bad = ModelConfig {
            cv_folds: 1,
            ..ModelConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
