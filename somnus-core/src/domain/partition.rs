// somnus-core/src/domain/partition.rs
//
// Consumer side of the split contract: EDA and modeling read a cleaned table
// back and separate it on the `train` flag.

use crate::domain::cleaning::TRAIN_COLUMN;
use crate::domain::error::DomainError;
use crate::domain::table::{Table, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum SplitView {
    /// `train` column present: rows flagged 1 and rows flagged 0.
    Partitioned { train: Table, test: Table },
    /// No `train` column. Consumers fall back to the whole dataset.
    Unpartitioned(Table),
}

impl SplitView {
    pub fn of(table: &Table) -> Result<Self, DomainError> {
        let Some(flags) = table.column(TRAIN_COLUMN) else {
            return Ok(SplitView::Unpartitioned(table.clone()));
        };

        let mut is_train = Vec::with_capacity(flags.len());
        for (row, v) in flags.values().iter().enumerate() {
            match v.as_i64() {
                Some(1) => is_train.push(true),
                Some(0) => is_train.push(false),
                _ => {
                    return Err(DomainError::InvalidSplitFlag {
                        row,
                        value: match v {
                            Value::Null => "<null>".to_string(),
                            other => other.to_string(),
                        },
                    });
                }
            }
        }

        Ok(SplitView::Partitioned {
            train: table.filter_rows(|i| is_train[i]),
            test: table.filter_rows(|i| !is_train[i]),
        })
    }

    /// Rows to fit or explore on: the train side, or everything.
    pub fn training(&self) -> &Table {
        match self {
            SplitView::Partitioned { train, .. } => train,
            SplitView::Unpartitioned(all) => all,
        }
    }

    /// Held-out rows, if the table was partitioned.
    pub fn held_out(&self) -> Option<&Table> {
        match self {
            SplitView::Partitioned { test, .. } => Some(test),
            SplitView::Unpartitioned(_) => None,
        }
    }

    pub fn is_partitioned(&self) -> bool {
        matches!(self, SplitView::Partitioned { .. })
    }
}
