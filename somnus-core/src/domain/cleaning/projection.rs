// somnus-core/src/domain/cleaning/projection.rs

use std::collections::HashSet;

use crate::domain::error::DomainError;
use crate::domain::table::Table;

/// Source header -> normalized name, in output order.
pub const SLEEP_HEALTH_COLUMNS: [(&str, &str); 5] = [
    ("Person ID", "person_id"),
    ("Sleep Duration", "sleep_duration"),
    ("Quality of Sleep", "sleep_quality"),
    ("Sleep Disorder", "sleep_disorder"),
    ("Stress Level", "stress_level"),
];

/// Ordered, bijective mapping from required source columns to their
/// normalized names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSchema {
    mappings: Vec<(String, String)>,
}

impl RenameSchema {
    pub fn new<S, T>(pairs: impl IntoIterator<Item = (S, T)>) -> Result<Self, DomainError>
    where
        S: Into<String>,
        T: Into<String>,
    {
        let mappings: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(s, t)| (s.into(), t.into()))
            .collect();

        let mut sources = HashSet::new();
        let mut targets = HashSet::new();
        for (source, target) in &mappings {
            if !sources.insert(source.as_str()) {
                return Err(DomainError::DuplicateColumn(source.clone()));
            }
            if !targets.insert(target.as_str()) {
                return Err(DomainError::DuplicateColumn(target.clone()));
            }
        }
        Ok(Self { mappings })
    }

    /// The fixed schema of the sleep health dataset.
    pub fn sleep_health() -> Self {
        Self {
            mappings: SLEEP_HEALTH_COLUMNS
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
        }
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|(s, _)| s.as_str())
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|(_, t)| t.as_str())
    }

    /// Required source columns absent from `table`, in schema order.
    pub fn missing_in(&self, table: &Table) -> Vec<String> {
        self.sources()
            .filter(|s| !table.has_column(s))
            .map(str::to_string)
            .collect()
    }
}

/// Keeps only the schema's source columns, renamed, in schema order.
///
/// Fails with [`DomainError::Schema`] listing every missing source column.
/// Row order and row count are preserved; `raw` is left untouched.
pub fn project(raw: &Table, schema: &RenameSchema) -> Result<Table, DomainError> {
    let missing = schema.missing_in(raw);
    if !missing.is_empty() {
        return Err(DomainError::Schema { missing });
    }

    let columns = schema
        .mappings
        .iter()
        .map(|(source, target)| raw.require(source).map(|c| c.clone().renamed(target)))
        .collect::<Result<Vec<_>, _>>()?;

    Table::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{Column, Value};

    fn raw_with(names: &[&str]) -> Result<Table, DomainError> {
        Table::new(
            names
                .iter()
                .map(|n| Column::from_values(*n, vec![1_i64, 2]))
                .collect(),
        )
    }

    #[test]
    fn test_project_drops_extra_columns_and_renames() -> Result<(), DomainError> {
        let raw = raw_with(&[
            "Extra Column",
            "Stress Level",
            "Person ID",
            "Sleep Disorder",
            "Quality of Sleep",
            "Sleep Duration",
        ])?;
        let projected = project(&raw, &RenameSchema::sleep_health())?;
        assert_eq!(
            projected.column_names(),
            vec![
                "person_id",
                "sleep_duration",
                "sleep_quality",
                "sleep_disorder",
                "stress_level"
            ]
        );
        assert_eq!(projected.len(), 2);
        // input untouched
        assert!(raw.has_column("Extra Column"));
        Ok(())
    }

    #[test]
    fn test_project_reports_every_missing_column() -> Result<(), DomainError> {
        let raw = raw_with(&["Person ID", "Sleep Duration"])?;
        let err = project(&raw, &RenameSchema::sleep_health());
        assert_eq!(
            err,
            Err(DomainError::Schema {
                missing: vec![
                    "Quality of Sleep".into(),
                    "Sleep Disorder".into(),
                    "Stress Level".into()
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn test_project_is_case_and_spacing_sensitive() -> Result<(), DomainError> {
        let raw = raw_with(&[
            "person id",
            "Sleep Duration",
            "Quality of Sleep",
            "Sleep Disorder",
            "Stress  Level",
        ])?;
        let Err(DomainError::Schema { missing }) = project(&raw, &RenameSchema::sleep_health())
        else {
            panic!("expected a schema error");
        };
        assert_eq!(missing, vec!["Person ID", "Stress Level"]);
        Ok(())
    }

    #[test]
    fn test_rename_schema_must_be_bijective() {
        assert_eq!(
            RenameSchema::new([("a", "x"), ("b", "x")]),
            Err(DomainError::DuplicateColumn("x".into()))
        );
        assert_eq!(
            RenameSchema::new([("a", "x"), ("a", "y")]),
            Err(DomainError::DuplicateColumn("a".into()))
        );
    }

    #[test]
    fn test_project_preserves_values() -> Result<(), DomainError> {
        let raw = Table::new(vec![
            Column::from_values("a", vec!["p", "q"]),
            Column::new("b", vec![Value::Null, Value::Float(1.5)]),
        ])?;
        let schema = RenameSchema::new([("b", "beta"), ("a", "alpha")])?;
        let projected = project(&raw, &schema)?;
        assert_eq!(projected.column_names(), vec!["beta", "alpha"]);
        assert_eq!(projected.require("beta")?.values(), &[Value::Null, Value::Float(1.5)]);
        Ok(())
    }
}
