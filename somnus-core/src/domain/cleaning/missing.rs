// somnus-core/src/domain/cleaning/missing.rs

use tracing::{debug, warn};

use crate::domain::table::{Table, Value};

pub const DISORDER_COLUMN: &str = "sleep_disorder";
pub const NO_DISORDER: &str = "No Disorder";

/// Replaces every null in `column` with `sentinel`; other cells and columns
/// are untouched. Idempotent.
///
/// A table without `column` is returned unchanged (caller error, logged).
pub fn fill_missing(mut table: Table, column: &str, sentinel: &str) -> Table {
    match table.column_mut(column) {
        Some(col) => {
            let filled = col.fill_nulls(&Value::from(sentinel));
            debug!(column, sentinel, filled, "Filled missing values");
        }
        None => warn!(column, "Cannot fill missing values: column absent"),
    }
    table
}

/// [`fill_missing`] with the sleep disorder column and its sentinel.
pub fn fill_disorder(table: Table) -> Table {
    fill_missing(table, DISORDER_COLUMN, NO_DISORDER)
}
