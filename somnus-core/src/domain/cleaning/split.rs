// somnus-core/src/domain/cleaning/split.rs

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::table::{Column, Table, Value};

pub const TRAIN_COLUMN: &str = "train";
pub const DEFAULT_SEED: u64 = 522;
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// How `test_fraction * n` becomes a whole number of test rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestSizeRounding {
    /// Round up: any fractional row goes to the test side.
    #[default]
    Ceil,
    Floor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SplitConfig {
    #[validate(range(
        exclusive_min = 0.0,
        exclusive_max = 1.0,
        message = "test_fraction must be strictly between 0 and 1"
    ))]
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    pub rounding: TestSizeRounding,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
            rounding: TestSizeRounding::default(),
        }
    }
}

fn default_test_fraction() -> f64 {
    DEFAULT_TEST_FRACTION
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl SplitConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Number of test rows for a table of `rows` rows.
    pub fn test_size(&self, rows: usize) -> usize {
        let exact = self.test_fraction * rows as f64;
        let rounded = match self.rounding {
            TestSizeRounding::Ceil => exact.ceil(),
            TestSizeRounding::Floor => exact.floor(),
        };
        // NaN and negatives saturate to 0
        rounded as usize
    }
}

/// Train membership per row (`true` = train).
///
/// Row indices are shuffled with a `StdRng` seeded from `config.seed`; the
/// first `test_size` shuffled indices form the test side. Tables of zero or
/// one row are entirely train.
pub fn assign_membership(rows: usize, config: &SplitConfig) -> Result<Vec<bool>, DomainError> {
    if rows <= 1 {
        return Ok(vec![true; rows]);
    }

    let test_rows = config.test_size(rows);
    if test_rows == 0 || test_rows >= rows {
        return Err(DomainError::DegenerateSplit { rows, test_rows });
    }

    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);

    let mut membership = vec![true; rows];
    for &i in &indices[..test_rows] {
        membership[i] = false;
    }

    debug!(
        rows,
        test_rows,
        seed = config.seed,
        "Assigned train/test membership"
    );
    Ok(membership)
}

/// Adds (or replaces) the integer `train` column: 1 for training rows, 0 for
/// held-out rows. Every row receives exactly one label.
pub fn label_split(table: Table, config: &SplitConfig) -> Result<Table, DomainError> {
    let membership = assign_membership(table.len(), config)?;
    let flags = membership
        .into_iter()
        .map(|is_train| Value::Int(i64::from(is_train)))
        .collect();
    table.with_column(Column::new(TRAIN_COLUMN, flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::DataType;

    fn ids(n: i64) -> Result<Table, DomainError> {
        Table::new(vec![Column::from_values("id", (0..n).collect::<Vec<_>>())])
    }

    fn train_flags(table: &Table) -> Result<Vec<i64>, DomainError> {
        Ok(table
            .require(TRAIN_COLUMN)?
            .values()
            .iter()
            .filter_map(|v| v.as_i64())
            .collect())
    }

    #[test]
    fn test_test_size_rounding() {
        let ceil = SplitConfig::default();
        assert_eq!(ceil.test_size(5), 1);
        assert_eq!(ceil.test_size(7), 2);
        assert_eq!(ceil.test_size(2), 1);

        let floor = SplitConfig {
            rounding: TestSizeRounding::Floor,
            ..SplitConfig::default()
        };
        assert_eq!(floor.test_size(7), 1);
        assert_eq!(floor.test_size(4), 0);
    }

    #[test]
    fn test_split_sizes_with_defaults() -> Result<(), DomainError> {
        let labeled = label_split(ids(10)?, &SplitConfig::default())?;
        let flags = train_flags(&labeled)?;
        assert_eq!(flags.len(), 10);
        assert_eq!(flags.iter().filter(|&&f| f == 1).count(), 8);
        assert_eq!(flags.iter().filter(|&&f| f == 0).count(), 2);
        assert_eq!(labeled.require(TRAIN_COLUMN)?.dtype(), DataType::Int);
        Ok(())
    }

    #[test]
    fn test_split_is_deterministic_for_a_seed() -> Result<(), DomainError> {
        let config = SplitConfig::default();
        assert_eq!(assign_membership(50, &config)?, assign_membership(50, &config)?);
        Ok(())
    }

    // Labels for seed 522 over 40 rows, as written to the processed CSV.
    // A change in the StdRng stream or in the shuffle shows up here first.
    #[test]
    fn test_seed_522_membership_is_stable() -> Result<(), DomainError> {
        let membership = assign_membership(40, &SplitConfig::default())?;
        let test_rows: Vec<usize> = membership
            .iter()
            .enumerate()
            .filter_map(|(i, &is_train)| (!is_train).then_some(i))
            .collect();
        assert_eq!(test_rows, vec![4, 11, 13, 16, 17, 18, 22, 32]);
        Ok(())
    }

    #[test]
    fn test_seed_changes_membership() -> Result<(), DomainError> {
        let a = assign_membership(100, &SplitConfig::with_seed(522))?;
        let b = assign_membership(100, &SplitConfig::with_seed(523))?;
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn test_single_row_is_train() -> Result<(), DomainError> {
        let labeled = label_split(ids(1)?, &SplitConfig::default())?;
        assert_eq!(train_flags(&labeled)?, vec![1]);
        Ok(())
    }

    #[test]
    fn test_empty_table_keeps_train_column() -> Result<(), DomainError> {
        let labeled = label_split(ids(0)?, &SplitConfig::default())?;
        assert!(labeled.is_empty());
        assert!(labeled.has_column(TRAIN_COLUMN));
        Ok(())
    }

    #[test]
    fn test_degenerate_split_is_rejected() {
        let floor = SplitConfig {
            rounding: TestSizeRounding::Floor,
            ..SplitConfig::default()
        };
        assert_eq!(
            assign_membership(4, &floor),
            Err(DomainError::DegenerateSplit {
                rows: 4,
                test_rows: 0
            })
        );

        let all_test = SplitConfig {
            test_fraction: 1.5,
            ..SplitConfig::default()
        };
        assert!(matches!(
            assign_membership(4, &all_test),
            Err(DomainError::DegenerateSplit { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        assert!(SplitConfig::default().validate().is_ok());
        let bad = SplitConfig {
            test_fraction: 1.0,
            ..SplitConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
