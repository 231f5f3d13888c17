// somnus/src/commands/clean.rs
//
// USE CASE: raw CSV -> cleaned CSV with the train/test flag.

use std::path::{Path, PathBuf};

use somnus_core::application::clean_dataset;
use somnus_core::infrastructure::config::PipelineConfig;

use super::fail;

pub fn execute(
    project_dir: &Path,
    config: &PipelineConfig,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let source = source.unwrap_or_else(|| config.paths.raw_in(project_dir));
    let dest = dest.unwrap_or_else(|| config.paths.processed_in(project_dir));

    let mut split = config.split.clone();
    if let Some(seed) = seed {
        split.seed = seed;
    }

    println!("🧹 Cleaning {} (seed {})...", source.display(), split.seed);
    match clean_dataset(&source, &dest, &split) {
        Ok(cleaned) => println!(
            "✨ Cleaned data saved to {} ({} rows: {} train / {} test)",
            dest.display(),
            cleaned.len(),
            cleaned.train_count(),
            cleaned.test_count()
        ),
        Err(e) => fail("Clean", &e),
    }
    Ok(())
}
