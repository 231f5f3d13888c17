// somnus-core/src/application/clean.rs
//
// USE CASE: raw CSV -> cleaned CSV carrying the train/test flag.

use std::path::Path;
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::cleaning::{CleanedTable, SplitConfig, clean};
use crate::error::SomnusError;
use crate::infrastructure::adapters::csv::{read_table, write_table};
use crate::infrastructure::error::InfrastructureError;

/// Reads `source`, cleans it and writes the result to `dest`.
///
/// Nothing is written unless cleaning succeeds: a schema violation leaves
/// `dest` untouched (an older artifact at that path survives).
#[instrument(skip(split), fields(source = %source.display(), dest = %dest.display()))]
pub fn clean_dataset(
    source: &Path,
    dest: &Path,
    split: &SplitConfig,
) -> Result<CleanedTable, SomnusError> {
    split.validate().map_err(InfrastructureError::from)?;

    let raw = read_table(source)?;
    info!(rows = raw.len(), columns = raw.width(), "Raw dataset loaded");

    let cleaned = clean(&raw, split)?;
    write_table(cleaned.table(), dest)?;

    Ok(cleaned)
}
