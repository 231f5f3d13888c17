// somnus-core/src/infrastructure/adapters/csv.rs

use csv::{ReaderBuilder, WriterBuilder};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::table::{Column, Table, Value};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write_with;

/// Cell texts read as missing values: pandas' default `na_values`, so a raw
/// dataset that spells "no disorder" as `None` loads as null. Matching is
/// exact and case-sensitive (`none` stays text).
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

/// Types a raw column: all integers -> Int, all numbers -> Float, else Text
/// (text keeps the original spelling of every cell).
fn typed_column(name: &str, cells: Vec<Option<String>>) -> Column {
    let present = || cells.iter().flatten().map(|s| s.trim());

    if present().all(|s| s.parse::<i64>().is_ok()) && present().next().is_some() {
        let values = cells
            .iter()
            .map(|c| match c.as_deref().map(|s| s.trim().parse::<i64>()) {
                Some(Ok(i)) => Value::Int(i),
                _ => Value::Null,
            })
            .collect();
        return Column::new(name, values);
    }

    if present().all(|s| s.parse::<f64>().is_ok()) && present().next().is_some() {
        let values = cells
            .iter()
            .map(|c| match c.as_deref().map(|s| s.trim().parse::<f64>()) {
                Some(Ok(f)) => Value::Float(f),
                _ => Value::Null,
            })
            .collect();
        return Column::new(name, values);
    }

    Column::new(name, cells.into_iter().map(Value::from).collect())
}

/// Parses CSV text (header row first) into a typed [`Table`].
pub fn read_table_from<R: Read>(reader: R) -> Result<Table, InfrastructureError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for record in rdr.records() {
        let record = record?;
        for (col, field) in cells.iter_mut().zip(record.iter()) {
            col.push((!is_na(field)).then(|| field.to_string()));
        }
    }

    let columns = headers
        .iter()
        .zip(cells)
        .map(|(name, col)| typed_column(name, col))
        .collect();

    Table::new(columns).map_err(InfrastructureError::Table)
}

#[instrument]
pub fn read_table(path: &Path) -> Result<Table, InfrastructureError> {
    if !path.is_file() {
        return Err(InfrastructureError::InputNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    let table = read_table_from(file)?;
    debug!(rows = table.len(), columns = table.width(), "CSV loaded");
    Ok(table)
}

/// Serializes a table as CSV: header row, no index column, nulls as empty
/// cells.
pub fn write_table_to<W: Write>(table: &Table, writer: W) -> Result<(), InfrastructureError> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(table.column_names())?;

    for i in 0..table.len() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.get(i).map(ToString::to_string).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// [`write_table_to`] a file, atomically (see `infrastructure::fs`).
#[instrument(skip(table), fields(rows = table.len()))]
pub fn write_table(table: &Table, path: &Path) -> Result<(), InfrastructureError> {
    atomic_write_with(path, |w| write_table_to(table, w))?;
    debug!("CSV written");
    Ok(())
}
