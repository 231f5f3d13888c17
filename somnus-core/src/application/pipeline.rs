// somnus-core/src/application/pipeline.rs
//
// USE CASE: full run. Optional acquisition, then clean -> EDA -> model,
// every stage reading the artifact the previous one wrote.

use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

use crate::application::acquire::{AcquireReport, acquire, fetcher_for};
use crate::application::clean::clean_dataset;
use crate::application::eda::{EdaArtifacts, run_eda};
use crate::application::model::{ModelArtifacts, run_model};
use crate::domain::modeling::TestMetrics;
use crate::error::SomnusError;
use crate::infrastructure::config::PipelineConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub acquired: Option<AcquireReport>,
    pub cleaned_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub eda: EdaArtifacts,
    pub model: ModelArtifacts,
    pub test_metrics: Option<TestMetrics>,
}

/// `source` overrides `acquisition.source`; with neither, the raw file must
/// already exist at `paths.raw`.
#[instrument(skip(config))]
pub async fn run_pipeline(
    project_dir: &Path,
    config: &PipelineConfig,
    source: Option<&str>,
) -> Result<PipelineOutcome, SomnusError> {
    let paths = &config.paths;
    let raw = paths.raw_in(project_dir);
    let processed = paths.processed_in(project_dir);

    // 1. Acquire
    let acquired = match source.or(config.acquisition.source.as_deref()) {
        Some(location) => {
            let timeout = Duration::from_secs(config.acquisition.timeout_secs);
            let fetcher = fetcher_for(location, timeout)?;
            let report =
                acquire(fetcher.as_ref(), location, &raw, &config.acquisition.retry).await?;
            Some(report)
        }
        None => None,
    };

    // 2. Clean
    let cleaned = clean_dataset(&raw, &processed, &config.split)?;

    // 3. Explore
    let (_, eda) = run_eda(&processed, &paths.results_in(project_dir))?;

    // 4. Model
    let (report, model) = run_model(
        &processed,
        &paths.model_prefix_in(project_dir),
        &config.model,
    )?;

    info!(rows = cleaned.len(), "Pipeline finished");
    Ok(PipelineOutcome {
        acquired,
        cleaned_rows: cleaned.len(),
        train_rows: cleaned.train_count(),
        test_rows: cleaned.test_count(),
        eda,
        model,
        test_metrics: report.test,
    })
}
