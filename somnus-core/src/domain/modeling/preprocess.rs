// somnus-core/src/domain/modeling/preprocess.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::cleaning::DISORDER_COLUMN;
use crate::domain::error::DomainError;
use crate::domain::exploration::{DURATION_COLUMN, QUALITY_COLUMN, STRESS_COLUMN};
use crate::domain::table::Table;

/// Feature encoding learned on the fit rows:
/// scaled `sleep_duration`, one-hot `sleep_disorder`, raw `sleep_quality`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    duration_mean: f64,
    duration_scale: f64,
    categories: Vec<String>,
}

impl Preprocessor {
    pub fn fit(table: &Table) -> Result<Self, DomainError> {
        let duration = complete_numeric(table, DURATION_COLUMN)?;
        let n = duration.len();
        let (duration_mean, duration_scale) = if n == 0 {
            (0.0, 1.0)
        } else {
            let mean = duration.iter().sum::<f64>() / n as f64;
            let var = duration.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
            let std = var.sqrt();
            // constant feature: center only
            (mean, if std > 0.0 { std } else { 1.0 })
        };

        let categories: BTreeSet<String> = table
            .require(DISORDER_COLUMN)?
            .labels()
            .into_iter()
            .flatten()
            .collect();

        Ok(Self {
            duration_mean,
            duration_scale,
            categories: categories.into_iter().collect(),
        })
    }

    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec![DURATION_COLUMN.to_string()];
        names.extend(
            self.categories
                .iter()
                .map(|c| format!("{}_{}", DISORDER_COLUMN, c)),
        );
        names.push(QUALITY_COLUMN.to_string());
        names
    }

    /// Design matrix, one row per table row. Unseen or missing disorder
    /// categories encode as all zeros.
    pub fn transform(&self, table: &Table) -> Result<Vec<Vec<f64>>, DomainError> {
        let duration = complete_numeric(table, DURATION_COLUMN)?;
        let quality = complete_numeric(table, QUALITY_COLUMN)?;
        let disorder = table.require(DISORDER_COLUMN)?.labels();

        let rows = duration
            .iter()
            .zip(&quality)
            .zip(&disorder)
            .map(|((d, q), label)| {
                let mut row = Vec::with_capacity(self.categories.len() + 2);
                row.push((d - self.duration_mean) / self.duration_scale);
                row.extend(
                    self.categories
                        .iter()
                        .map(|c| f64::from(u8::from(label.as_deref() == Some(c.as_str())))),
                );
                row.push(*q);
                row
            })
            .collect();
        Ok(rows)
    }
}

/// The regression target.
pub fn target(table: &Table) -> Result<Vec<f64>, DomainError> {
    complete_numeric(table, STRESS_COLUMN)
}

/// Numeric column without gaps; a null is an error rather than a silent drop.
fn complete_numeric(table: &Table, name: &str) -> Result<Vec<f64>, DomainError> {
    table
        .require(name)?
        .numeric_values()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| DomainError::MissingValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}
