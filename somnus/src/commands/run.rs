// somnus/src/commands/run.rs
//
// USE CASE: the whole pipeline in one go.

use std::path::Path;

use somnus_core::application::run_pipeline;
use somnus_core::infrastructure::config::PipelineConfig;

pub async fn execute(
    project_dir: &Path,
    config: &PipelineConfig,
    input_path: Option<String>,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    println!("🚀 Running pipeline in {}...", project_dir.display());

    match run_pipeline(project_dir, config, input_path.as_deref()).await {
        Ok(outcome) => {
            if let Some(acquired) = &outcome.acquired {
                println!("   📥 Acquired {} rows", acquired.rows);
            }
            println!(
                "   🧹 Cleaned {} rows ({} train / {} test)",
                outcome.cleaned_rows, outcome.train_rows, outcome.test_rows
            );
            println!("   📊 EDA: {}", outcome.eda.json.display());
            println!("   🤖 Model: {}", outcome.model.cv_results.display());
            if let Some(metrics) = &outcome.test_metrics {
                println!("   Test MSE: {:.4} | Test R2: {:.4}", metrics.mse, metrics.r2);
            }
            println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
