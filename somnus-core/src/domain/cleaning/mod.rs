// somnus-core/src/domain/cleaning/mod.rs
//
// Raw sleep health table -> cleaned table carrying the train/test contract
// every downstream stage reads.

pub mod missing;
pub mod projection;
pub mod split;

pub use missing::{DISORDER_COLUMN, NO_DISORDER, fill_disorder, fill_missing};
pub use projection::{RenameSchema, SLEEP_HEALTH_COLUMNS, project};
pub use split::{
    DEFAULT_SEED, DEFAULT_TEST_FRACTION, SplitConfig, TRAIN_COLUMN, TestSizeRounding,
    assign_membership, label_split,
};

use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::table::Table;

/// Output column order of a cleaned table.
pub const CLEANED_COLUMNS: [&str; 6] = [
    "person_id",
    "sleep_duration",
    "sleep_quality",
    "sleep_disorder",
    "stress_level",
    TRAIN_COLUMN,
];

/// A table produced by [`clean`]: exactly [`CLEANED_COLUMNS`], no null
/// `sleep_disorder`, and a `train` flag of 0/1 on every row.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable(Table);

impl CleanedTable {
    pub fn table(&self) -> &Table {
        &self.0
    }

    pub fn into_inner(self) -> Table {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rows flagged `train == 1`.
    pub fn train_count(&self) -> usize {
        self.0
            .column(TRAIN_COLUMN)
            .map(|c| c.values().iter().filter(|v| v.as_i64() == Some(1)).count())
            .unwrap_or(0)
    }

    pub fn test_count(&self) -> usize {
        self.len() - self.train_count()
    }
}

impl AsRef<Table> for CleanedTable {
    fn as_ref(&self) -> &Table {
        &self.0
    }
}

/// Project/rename -> fill missing disorders -> deterministic split.
///
/// Pure function of `(raw, split)`. Fails atomically: a schema error is
/// returned before any split is attempted and no partial table escapes.
#[instrument(skip(raw), fields(rows = raw.len(), columns = raw.width()))]
pub fn clean(raw: &Table, split: &SplitConfig) -> Result<CleanedTable, DomainError> {
    let projected = project(raw, &RenameSchema::sleep_health())?;

    let missing_disorders = projected.require(DISORDER_COLUMN)?.null_count();
    let filled = fill_disorder(projected);

    let labeled = label_split(filled, split)?;
    let cleaned = CleanedTable(labeled);

    info!(
        rows = cleaned.len(),
        train = cleaned.train_count(),
        test = cleaned.test_count(),
        filled_disorders = missing_disorders,
        "Cleaned sleep health table"
    );
    Ok(cleaned)
}
