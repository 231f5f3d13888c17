// somnus-core/src/domain/table/column.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value::Value;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int,
    Float,
    Text,
}

impl DataType {
    /// Narrowest type able to hold every non-null value. Columns with no
    /// non-null value default to `Text`.
    pub fn infer(values: &[Value]) -> Self {
        let mut seen_any = false;
        let mut seen_float = false;
        for v in values {
            match v {
                Value::Null => continue,
                Value::Int(_) => seen_any = true,
                Value::Float(_) => {
                    seen_any = true;
                    seen_float = true;
                }
                Value::Text(_) => return DataType::Text,
            }
        }
        match (seen_any, seen_float) {
            (false, _) => DataType::Text,
            (true, true) => DataType::Float,
            (true, false) => DataType::Int,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
        };
        write!(f, "{}", s)
    }
}

/// A named, typed column. The data type is derived from the values on
/// construction and kept in sync by every mutating method.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DataType,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let dtype = DataType::infer(&values);
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn from_values<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces every null with `fill`. Returns how many cells were filled.
    pub fn fill_nulls(&mut self, fill: &Value) -> usize {
        let mut filled = 0;
        for v in self.values.iter_mut().filter(|v| v.is_null()) {
            *v = fill.clone();
            filled += 1;
        }
        if filled > 0 && matches!(fill, Value::Text(_)) && self.dtype != DataType::Text {
            // A text sentinel in a numeric column turns the whole column into text
            for v in self.values.iter_mut() {
                if !matches!(v, Value::Text(_)) {
                    *v = Value::Text(v.to_string());
                }
            }
        }
        self.dtype = DataType::infer(&self.values);
        filled
    }

    /// Numeric view with nulls kept as `None`. Fails on the first text cell.
    pub fn numeric_values(&self) -> Result<Vec<Option<f64>>, DomainError> {
        self.values
            .iter()
            .enumerate()
            .map(|(row, v)| match v {
                Value::Null => Ok(None),
                Value::Text(_) => Err(DomainError::NonNumeric {
                    column: self.name.clone(),
                    row,
                }),
                other => Ok(other.as_f64()),
            })
            .collect()
    }

    /// Non-null numeric values, in row order.
    pub fn non_null_f64(&self) -> Result<Vec<f64>, DomainError> {
        Ok(self.numeric_values()?.into_iter().flatten().collect())
    }

    /// Cells as strings; nulls become `None`.
    pub fn labels(&self) -> Vec<Option<String>> {
        self.values
            .iter()
            .map(|v| match v {
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect()
    }

    pub(crate) fn take(&self, indices: &[usize]) -> Column {
        let values = indices
            .iter()
            .filter_map(|&i| self.values.get(i).cloned())
            .collect();
        Column {
            name: self.name.clone(),
            // keep the declared type even when the subset is empty or all-null
            dtype: self.dtype,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_types() {
        assert_eq!(
            DataType::infer(&[Value::Int(1), Value::Null, Value::Int(2)]),
            DataType::Int
        );
        assert_eq!(
            DataType::infer(&[Value::Int(1), Value::Float(2.5)]),
            DataType::Float
        );
        assert_eq!(
            DataType::infer(&[Value::Int(1), Value::from("a")]),
            DataType::Text
        );
        assert_eq!(DataType::infer(&[Value::Null]), DataType::Text);
        assert_eq!(DataType::infer(&[]), DataType::Text);
    }

    #[test]
    fn test_fill_nulls_counts_and_retypes() {
        let mut col = Column::new("d", vec![Value::Null, Value::from("Insomnia"), Value::Null]);
        let filled = col.fill_nulls(&Value::from("No Disorder"));
        assert_eq!(filled, 2);
        assert_eq!(col.null_count(), 0);
        assert_eq!(col.dtype(), DataType::Text);

        let mut numeric = Column::new("n", vec![Value::Int(1), Value::Null]);
        numeric.fill_nulls(&Value::from("none"));
        assert_eq!(numeric.values(), &[Value::from("1"), Value::from("none")]);
    }

    #[test]
    fn test_numeric_values_rejects_text() {
        let col = Column::new("x", vec![Value::Int(1), Value::from("oops")]);
        assert_eq!(
            col.numeric_values(),
            Err(DomainError::NonNumeric {
                column: "x".into(),
                row: 1
            })
        );
    }
}
