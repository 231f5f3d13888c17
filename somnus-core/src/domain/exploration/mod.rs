// somnus-core/src/domain/exploration/mod.rs

pub mod stats;

pub use stats::{ColumnSummary, Trend};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::cleaning::DISORDER_COLUMN;
use crate::domain::error::DomainError;
use crate::domain::partition::SplitView;
use crate::domain::table::Table;

pub const DURATION_COLUMN: &str = "sleep_duration";
pub const QUALITY_COLUMN: &str = "sleep_quality";
pub const STRESS_COLUMN: &str = "stress_level";

/// Columns the exploration needs. `train` is optional.
pub const EDA_COLUMNS: [&str; 4] = [DURATION_COLUMN, QUALITY_COLUMN, DISORDER_COLUMN, STRESS_COLUMN];

const MISSING_LABEL: &str = "(missing)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    /// Only rows flagged `train == 1`.
    Train,
    /// No split flag available; every row.
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub x: String,
    pub y: String,
    pub pearson: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaSummary {
    pub subset: Subset,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    pub disorder_counts: BTreeMap<String, usize>,
    pub stress_by_disorder: BTreeMap<String, f64>,
    pub correlations: Vec<Correlation>,
    /// Stress regressed on sleep duration.
    pub duration_trend: Option<Trend>,
}

/// Descriptive statistics over the training subset of a cleaned table
/// (or the whole table when it carries no `train` flag).
pub fn explore(table: &Table) -> Result<EdaSummary, DomainError> {
    for name in EDA_COLUMNS {
        table.require(name)?;
    }

    let view = SplitView::of(table)?;
    let subset = if view.is_partitioned() {
        Subset::Train
    } else {
        Subset::All
    };
    let data = view.training();

    let duration = data.require(DURATION_COLUMN)?.numeric_values()?;
    let quality = data.require(QUALITY_COLUMN)?.numeric_values()?;
    let stress = data.require(STRESS_COLUMN)?.numeric_values()?;
    let disorder = data.require(DISORDER_COLUMN)?.labels();

    let columns = [
        (DURATION_COLUMN, &duration),
        (QUALITY_COLUMN, &quality),
        (STRESS_COLUMN, &stress),
    ]
    .into_iter()
    .map(|(name, values)| {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        ColumnSummary::describe(name, &present)
    })
    .collect();

    let mut disorder_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut stress_sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (label, s) in disorder.iter().zip(&stress) {
        let key = label.clone().unwrap_or_else(|| MISSING_LABEL.to_string());
        *disorder_counts.entry(key.clone()).or_default() += 1;
        if let Some(s) = s {
            let entry = stress_sums.entry(key).or_insert((0.0, 0));
            entry.0 += s;
            entry.1 += 1;
        }
    }
    let stress_by_disorder = stress_sums
        .into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect();

    let correlations = [DURATION_COLUMN, QUALITY_COLUMN]
        .into_iter()
        .zip([&duration, &quality])
        .map(|(name, xs)| {
            let (x, y) = paired(xs, &stress);
            Correlation {
                x: name.to_string(),
                y: STRESS_COLUMN.to_string(),
                pearson: stats::pearson(&x, &y),
            }
        })
        .collect();

    let (x, y) = paired(&duration, &stress);
    let duration_trend = stats::linear_trend(&x, &y);

    Ok(EdaSummary {
        subset,
        rows: data.len(),
        columns,
        disorder_counts,
        stress_by_disorder,
        correlations,
        duration_trend,
    })
}

/// Rows where both sides are present.
fn paired(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cleaning::TRAIN_COLUMN;
    use crate::domain::table::{Column, Value};

    fn sample_data() -> Result<Table, DomainError> {
        Table::new(vec![
            Column::from_values("person_id", vec![1_i64, 2, 3, 4, 5]),
            Column::from_values(DURATION_COLUMN, vec![7.5, 6.0, 8.0, 5.5, 7.0]),
            Column::from_values(QUALITY_COLUMN, vec![8_i64, 6, 9, 5, 7]),
            Column::from_values(
                DISORDER_COLUMN,
                vec!["No Disorder", "Insomnia", "No Disorder", "Sleep Apnea", "No Disorder"],
            ),
            Column::from_values(STRESS_COLUMN, vec![4_i64, 7, 3, 8, 5]),
            Column::from_values(TRAIN_COLUMN, vec![1_i64, 1, 0, 1, 0]),
        ])
    }

    #[test]
    fn test_explore_uses_training_subset() -> Result<(), DomainError> {
        let summary = explore(&sample_data()?)?;
        assert_eq!(summary.subset, Subset::Train);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.disorder_counts.get("Insomnia"), Some(&1));
        assert_eq!(summary.disorder_counts.get("No Disorder"), Some(&1));
        assert_eq!(summary.stress_by_disorder.get("Sleep Apnea"), Some(&8.0));
        // shorter sleep, more stress
        let duration_corr = summary.correlations[0].pearson;
        assert!(duration_corr.is_some_and(|r| r < 0.0));
        assert!(summary.duration_trend.is_some_and(|t| t.slope < 0.0));
        Ok(())
    }

    #[test]
    fn test_explore_without_train_column_uses_all_rows() -> Result<(), DomainError> {
        let table = Table::new(
            sample_data()?
                .into_columns()
                .into_iter()
                .filter(|c| c.name() != TRAIN_COLUMN)
                .collect(),
        )?;
        let summary = explore(&table)?;
        assert_eq!(summary.subset, Subset::All);
        assert_eq!(summary.rows, 5);
        Ok(())
    }

    #[test]
    fn test_explore_empty_and_single_row() -> Result<(), DomainError> {
        let empty = sample_data()?.filter_rows(|_| false);
        let summary = explore(&empty)?;
        assert_eq!(summary.rows, 0);
        assert!(summary.duration_trend.is_none());
        assert!(summary.correlations.iter().all(|c| c.pearson.is_none()));

        let single = sample_data()?.filter_rows(|i| i == 0);
        let summary = explore(&single)?;
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.columns[0].median, Some(7.5));
        assert!(summary.duration_trend.is_none());
        Ok(())
    }

    #[test]
    fn test_explore_missing_columns() -> Result<(), DomainError> {
        let table = Table::new(vec![
            Column::from_values(DURATION_COLUMN, vec![7.5, 6.0]),
            Column::from_values(QUALITY_COLUMN, vec![8_i64, 6]),
            Column::from_values(TRAIN_COLUMN, vec![1_i64, 1]),
        ])?;
        assert_eq!(
            explore(&table),
            Err(DomainError::ColumnNotFound(DISORDER_COLUMN.into()))
        );
        Ok(())
    }

    #[test]
    fn test_explore_counts_missing_disorders() -> Result<(), DomainError> {
        let table = Table::new(vec![
            Column::from_values(DURATION_COLUMN, vec![7.5, 6.0]),
            Column::from_values(QUALITY_COLUMN, vec![8_i64, 6]),
            Column::new(DISORDER_COLUMN, vec![Value::Null, Value::from("Insomnia")]),
            Column::from_values(STRESS_COLUMN, vec![4_i64, 7]),
        ])?;
        let summary = explore(&table)?;
        assert_eq!(summary.disorder_counts.get(MISSING_LABEL), Some(&1));
        Ok(())
    }
}
