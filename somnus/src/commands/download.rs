// somnus/src/commands/download.rs
//
// USE CASE: fetch the raw dataset (URL or local path).

use std::path::PathBuf;
use std::time::Duration;

use somnus_core::application::{acquire, fetcher_for};
use somnus_core::infrastructure::config::PipelineConfig;

use super::fail;

pub async fn execute(
    config: &PipelineConfig,
    input_path: String,
    output_path: PathBuf,
) -> anyhow::Result<()> {
    println!("📥 Fetching {}...", input_path);

    let timeout = Duration::from_secs(config.acquisition.timeout_secs);
    let fetcher = fetcher_for(&input_path, timeout)?;

    match acquire(
        fetcher.as_ref(),
        &input_path,
        &output_path,
        &config.acquisition.retry,
    )
    .await
    {
        Ok(report) => println!(
            "✨ Data saved to {} ({} rows, {} columns, {} attempt(s))",
            output_path.display(),
            report.rows,
            report.columns,
            report.attempts
        ),
        Err(e) => fail("Download", &e),
    }
    Ok(())
}
