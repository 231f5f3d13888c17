// somnus/src/commands/model.rs
//
// USE CASE: baseline ridge model of stress level.

use std::path::{Path, PathBuf};

use somnus_core::application::run_model;
use somnus_core::infrastructure::config::PipelineConfig;
use somnus_core::infrastructure::render::{render_cv, render_test_metrics};

use super::fail;

pub fn execute(
    project_dir: &Path,
    config: &PipelineConfig,
    input_file: Option<PathBuf>,
    output_prefix: Option<PathBuf>,
) -> anyhow::Result<()> {
    let input = input_file.unwrap_or_else(|| config.paths.processed_in(project_dir));
    let prefix = output_prefix.unwrap_or_else(|| config.paths.model_prefix_in(project_dir));

    println!("🤖 Modeling stress level from {}...", input.display());
    let (report, artifacts) = match run_model(&input, &prefix, &config.model) {
        Ok(done) => done,
        Err(e) => fail("Model", &e),
    };

    println!("{}", render_cv(&report));
    match &report.test {
        Some(metrics) => {
            println!("{}", render_test_metrics(metrics));
            println!("Test MSE: {:.4}", metrics.mse);
            println!("Test R2: {:.4}", metrics.r2);
        }
        None => println!("Warning: no held-out rows, test evaluation skipped"),
    }
    println!(
        "✨ Results saved with prefix {} ({})",
        prefix.display(),
        artifacts.cv_results.display()
    );
    Ok(())
}
