// somnus-core/src/application/model.rs
//
// USE CASE: cross-validate, fit and evaluate the baseline stress model,
// then write the tabular artifacts next to `<output_prefix>`.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::modeling::{ModelConfig, ModelReport, TestMetrics, evaluate};
use crate::domain::partition::SplitView;
use crate::error::SomnusError;
use crate::infrastructure::adapters::csv::read_table;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, atomic_write_with};
use crate::infrastructure::render::{render_cv, render_test_metrics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifacts {
    pub cv_results: PathBuf,
    pub cv_text: PathBuf,
    /// `None` when there was no held-out side to score.
    pub test_metrics: Option<PathBuf>,
    pub test_text: Option<PathBuf>,
    pub predictions: PathBuf,
}

/// `results/model_analysis` + `_cv_results.csv` -> `results/model_analysis_cv_results.csv`
pub fn artifact_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[instrument(skip(config), fields(input = %input.display(), prefix = %output_prefix.display()))]
pub fn run_model(
    input: &Path,
    output_prefix: &Path,
    config: &ModelConfig,
) -> Result<(ModelReport, ModelArtifacts), SomnusError> {
    config.validate().map_err(InfrastructureError::from)?;

    let table = read_table(input)?;
    let view = SplitView::of(&table)?;
    info!(
        train = view.training().len(),
        held_out = view.held_out().map(|t| t.len()).unwrap_or(0),
        "Modeling input loaded"
    );

    let report = evaluate(&view, config)?;

    let cv_results = artifact_path(output_prefix, "_cv_results.csv");
    let cv_text = artifact_path(output_prefix, "_cv_results.txt");
    atomic_write_with(&cv_results, |w| write_cv_csv(&report, w))?;
    atomic_write(&cv_text, render_cv(&report))?;

    let (test_metrics, test_text) = match &report.test {
        Some(metrics) => {
            let csv_path = artifact_path(output_prefix, "_test_metrics.csv");
            let txt_path = artifact_path(output_prefix, "_test_metrics.txt");
            atomic_write_with(&csv_path, |w| write_metrics_csv(metrics, w))?;
            atomic_write(&txt_path, render_test_metrics(metrics))?;
            (Some(csv_path), Some(txt_path))
        }
        None => (None, None),
    };

    let predictions = artifact_path(output_prefix, "_predictions.csv");
    atomic_write_with(&predictions, |w| write_predictions_csv(&report, w))?;

    info!("Model artifacts written");
    Ok((
        report,
        ModelArtifacts {
            cv_results,
            cv_text,
            test_metrics,
            test_text,
            predictions,
        },
    ))
}

fn write_cv_csv(report: &ModelReport, w: &mut dyn Write) -> Result<(), InfrastructureError> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["fold", "train_mse", "test_mse", "train_r2", "test_r2"])?;
    for f in &report.folds {
        wtr.write_record(&[
            f.fold.to_string(),
            f.train_mse.to_string(),
            f.test_mse.to_string(),
            f.train_r2.to_string(),
            f.test_r2.to_string(),
        ])?;
    }
    let m = &report.cv_mean;
    wtr.write_record(&[
        "mean".to_string(),
        m.train_mse.to_string(),
        m.test_mse.to_string(),
        m.train_r2.to_string(),
        m.test_r2.to_string(),
    ])?;
    wtr.flush()?;
    Ok(())
}

fn write_metrics_csv(metrics: &TestMetrics, w: &mut dyn Write) -> Result<(), InfrastructureError> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["Metric", "Value"])?;
    wtr.write_record(["MSE".to_string(), metrics.mse.to_string()])?;
    wtr.write_record(["R2 Score".to_string(), metrics.r2.to_string()])?;
    wtr.flush()?;
    Ok(())
}

fn write_predictions_csv(
    report: &ModelReport,
    w: &mut dyn Write,
) -> Result<(), InfrastructureError> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["actual", "predicted", "residual"])?;
    for p in &report.predictions {
        wtr.write_record(&[
            p.actual.to_string(),
            p.predicted.to_string(),
            p.residual.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use anyhow::Result;
    use std::fs;

    /// Stress driven by duration and disorder, every fifth row held out.
    fn cleaned_csv(rows: usize, with_train: bool) -> String {
        let disorders = ["No Disorder", "Insomnia", "Sleep Apnea"];
        let mut out =
            String::from("person_id,sleep_duration,sleep_quality,sleep_disorder,stress_level");
        out.push_str(if with_train { ",train\n" } else { "\n" });
        for i in 0..rows {
            let duration = 5.0 + (i % 7) as f64 * 0.5;
            let quality = 4 + i % 5;
            let disorder = disorders[i % 3];
            let stress = 12 - duration as usize - (i % 3);
            out.push_str(&format!("{},{},{},{},{}", i + 1, duration, quality, disorder, stress));
            if with_train {
                out.push_str(if i % 5 == 0 { ",0" } else { ",1" });
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_artifact_path() {
        assert_eq!(
            artifact_path(Path::new("results/model_analysis"), "_cv_results.csv"),
            PathBuf::from("results/model_analysis_cv_results.csv")
        );
    }

    #[test]
    fn test_run_model_writes_all_artifacts() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("clean.csv");
        fs::write(&input, cleaned_csv(40, true))?;
        let prefix = dir.path().join("results/model_analysis");

        let (report, artifacts) = run_model(&input, &prefix, &ModelConfig::default())?;

        assert_eq!(report.train_rows, 32);
        assert_eq!(report.folds.len(), 5);
        assert_eq!(report.predictions.len(), 8);

        let cv = fs::read_to_string(&artifacts.cv_results)?;
        assert!(cv.starts_with("fold,train_mse,test_mse,train_r2,test_r2\n1,"));
        assert_eq!(cv.lines().count(), 7);
        assert!(cv.lines().last().unwrap_or_default().starts_with("mean,"));

        let metrics_path = artifacts.test_metrics.clone().unwrap_or_default();
        let metrics = fs::read_to_string(metrics_path)?;
        let lines: Vec<&str> = metrics.lines().collect();
        assert_eq!(lines[0], "Metric,Value");
        assert!(lines[1].starts_with("MSE,"));
        assert!(lines[2].starts_with("R2 Score,"));

        let preds = fs::read_to_string(&artifacts.predictions)?;
        assert_eq!(preds.lines().next(), Some("actual,predicted,residual"));
        assert_eq!(preds.lines().count(), 9);
        assert!(artifacts.cv_text.exists());
        Ok(())
    }

    #[test]
    fn test_run_model_without_train_column() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("clean.csv");
        fs::write(&input, cleaned_csv(20, false))?;
        let prefix = dir.path().join("model");

        let (report, artifacts) = run_model(&input, &prefix, &ModelConfig::default())?;

        assert_eq!(report.train_rows, 20);
        assert!(report.test.is_none());
        assert!(artifacts.test_metrics.is_none());
        assert!(!artifact_path(&prefix, "_test_metrics.csv").exists());
        assert!(artifacts.cv_results.exists());
        Ok(())
    }

    #[test]
    fn test_too_few_rows_for_folds() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("clean.csv");
        fs::write(&input, cleaned_csv(3, false))?;
        let prefix = dir.path().join("model");

        let res = run_model(&input, &prefix, &ModelConfig::default());
        assert!(matches!(
            res,
            Err(SomnusError::Domain(DomainError::InsufficientRows { .. }))
        ));
        assert!(!artifact_path(&prefix, "_cv_results.csv").exists());
        Ok(())
    }
}
