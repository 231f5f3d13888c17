// somnus-core/src/application/eda.rs
//
// USE CASE: exploratory summary of the cleaned dataset (training subset).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::exploration::{EdaSummary, Subset, explore};
use crate::error::SomnusError;
use crate::infrastructure::adapters::csv::read_table;
use crate::infrastructure::fs::atomic_write;
use crate::infrastructure::render::render_eda;

pub const EDA_JSON: &str = "eda_summary.json";
pub const EDA_TEXT: &str = "eda_summary.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    #[serde(flatten)]
    pub summary: EdaSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdaArtifacts {
    pub json: PathBuf,
    pub text: PathBuf,
}

#[instrument(fields(input = %input.display(), output_dir = %output_dir.display()))]
pub fn run_eda(input: &Path, output_dir: &Path) -> Result<(EdaReport, EdaArtifacts), SomnusError> {
    let table = read_table(input)?;
    let summary = explore(&table)?;

    match summary.subset {
        Subset::Train => info!(samples = summary.rows, "Using training subset"),
        Subset::All => warn!(samples = summary.rows, "'train' column not found, using all samples"),
    }

    let report = EdaReport {
        generated_at: Utc::now(),
        source: input.display().to_string(),
        summary,
    };

    let artifacts = EdaArtifacts {
        json: output_dir.join(EDA_JSON),
        text: output_dir.join(EDA_TEXT),
    };
    atomic_write(&artifacts.json, serde_json::to_string_pretty(&report)?)?;
    atomic_write(&artifacts.text, render_eda(&report.summary))?;

    info!("EDA artifacts written");
    Ok((report, artifacts))
}
