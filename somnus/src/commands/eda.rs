// somnus/src/commands/eda.rs
//
// USE CASE: exploratory summary of the cleaned dataset.

use std::path::{Path, PathBuf};

use somnus_core::SomnusError;
use somnus_core::application::run_eda;
use somnus_core::domain::exploration::Subset;
use somnus_core::infrastructure::config::PipelineConfig;
use somnus_core::infrastructure::error::InfrastructureError;

use super::fail;

pub fn execute(
    project_dir: &Path,
    config: &PipelineConfig,
    input_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let input = input_file.unwrap_or_else(|| config.paths.processed_in(project_dir));
    let output_dir = output_dir.unwrap_or_else(|| config.paths.results_in(project_dir));

    match run_eda(&input, &output_dir) {
        Ok((report, artifacts)) => {
            match report.summary.subset {
                Subset::Train => {
                    println!("Using training subset ({} samples)", report.summary.rows)
                }
                Subset::All => println!(
                    "Warning: 'train' column not found, using all {} samples",
                    report.summary.rows
                ),
            }
            println!(
                "📊 EDA summary saved to {} and {}",
                artifacts.json.display(),
                artifacts.text.display()
            );
        }
        Err(SomnusError::Infrastructure(InfrastructureError::InputNotFound(path))) => {
            eprintln!("Error: Input file '{}' not found.", path);
            std::process::exit(1);
        }
        Err(e) => fail("EDA", &e),
    }
    Ok(())
}
