// somnus-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    /// Required source columns absent from the raw table. Carries every
    /// missing name, in the order they are required.
    #[error("Schema Error: the following required columns are missing: {}", .missing.join(", "))]
    #[diagnostic(
        code(somnus::domain::schema),
        help("The raw CSV must contain the exact headers 'Person ID', 'Sleep Duration', 'Quality of Sleep', 'Sleep Disorder' and 'Stress Level'.")
    )]
    Schema { missing: Vec<String> },

    #[error("Column '{0}' not found")]
    #[diagnostic(code(somnus::domain::column_not_found))]
    ColumnNotFound(String),

    #[error("Duplicate column name '{0}'")]
    #[diagnostic(code(somnus::domain::duplicate_column))]
    DuplicateColumn(String),

    #[error("Column '{column}' has {actual} values, expected {expected}")]
    #[diagnostic(code(somnus::domain::ragged_table))]
    RaggedTable {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column '{column}' holds a non-numeric value at row {row}")]
    #[diagnostic(
        code(somnus::domain::non_numeric),
        help("Numeric columns may only contain numbers or empty cells.")
    )]
    NonNumeric { column: String, row: usize },

    #[error("Column '{column}' has a missing value at row {row}")]
    #[diagnostic(
        code(somnus::domain::missing_value),
        help("Run the cleaning stage first; model inputs must be complete.")
    )]
    MissingValue { column: String, row: usize },

    #[error("Cannot split {rows} rows with {test_rows} test rows: one side would be empty")]
    #[diagnostic(
        code(somnus::domain::degenerate_split),
        help("Adjust `split.test_fraction` or the rounding rule.")
    )]
    DegenerateSplit { rows: usize, test_rows: usize },

    #[error("Invalid 'train' flag at row {row}: expected 0 or 1, found '{value}'")]
    #[diagnostic(code(somnus::domain::split_flag))]
    InvalidSplitFlag { row: usize, value: String },

    #[error("Not enough rows: {needed} needed, {actual} available")]
    #[diagnostic(code(somnus::domain::insufficient_rows))]
    InsufficientRows { needed: usize, actual: usize },

    #[error("Linear system is singular, cannot fit the model")]
    #[diagnostic(
        code(somnus::domain::singular),
        help("Use a positive `model.alpha` to regularize the fit.")
    )]
    SingularSystem,
}
