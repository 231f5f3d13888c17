// somnus-core/src/domain/table/mod.rs

pub mod column;
pub mod value;

pub use column::{Column, DataType};
pub use value::Value;

use std::collections::HashSet;

use crate::domain::error::DomainError;

/// Ordered list of named, typed columns of equal length.
///
/// Invariants (checked by [`Table::new`] and preserved by every method):
/// column names are unique and all columns have the same number of rows.
/// A table may have columns and zero rows; its schema survives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for c in &columns {
            if !seen.insert(c.name()) {
                return Err(DomainError::DuplicateColumn(c.name().to_string()));
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(DomainError::RaggedTable {
                    column: bad.name().to_string(),
                    expected,
                    actual: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name() == name)
    }

    /// Like [`Table::column`], but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<&Column, DomainError> {
        self.column(name)
            .ok_or_else(|| DomainError::ColumnNotFound(name.to_string()))
    }

    /// Appends `column`, or replaces an existing column of the same name in place.
    pub fn with_column(mut self, column: Column) -> Result<Self, DomainError> {
        if self.width() > 0 && column.len() != self.len() {
            return Err(DomainError::RaggedTable {
                column: column.name().to_string(),
                expected: self.len(),
                actual: column.len(),
            });
        }
        match self.columns.iter().position(|c| c.name() == column.name()) {
            Some(idx) => self.columns[idx] = column,
            None => self.columns.push(column),
        }
        Ok(self)
    }

    /// New table with the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
        }
    }

    /// New table keeping the rows for which `keep(row_index)` holds.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(usize) -> bool,
    {
        let indices: Vec<usize> = (0..self.len()).filter(|&i| keep(i)).collect();
        self.select_rows(&indices)
    }

    /// One row as cells, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.len() {
            return None;
        }
        self.columns.iter().map(|c| c.get(index)).collect()
    }
}
