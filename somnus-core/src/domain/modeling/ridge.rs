// somnus-core/src/domain/modeling/ridge.rs

use serde::{Deserialize, Serialize};

use super::linalg;
use crate::domain::error::DomainError;

/// L2-regularized least squares with an unpenalized intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ridge {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Ridge {
    /// Closed form on centered data: `(XcᵀXc + αI) w = Xcᵀyc`,
    /// `intercept = ȳ - x̄·w`.
    pub fn fit(x: &[Vec<f64>], y: &[f64], alpha: f64) -> Result<Self, DomainError> {
        let n = x.len();
        if n == 0 || y.len() != n {
            return Err(DomainError::InsufficientRows {
                needed: 1,
                actual: n.min(y.len()),
            });
        }
        let p = x[0].len();

        let x_mean: Vec<f64> = (0..p)
            .map(|j| x.iter().map(|row| row[j]).sum::<f64>() / n as f64)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n as f64;

        let mut gram = vec![vec![0.0; p]; p];
        let mut rhs = vec![0.0; p];
        for (row, &target) in x.iter().zip(y) {
            let centered: Vec<f64> = row.iter().zip(&x_mean).map(|(v, m)| v - m).collect();
            let yc = target - y_mean;
            for i in 0..p {
                rhs[i] += centered[i] * yc;
                for j in i..p {
                    gram[i][j] += centered[i] * centered[j];
                }
            }
        }
        for i in 0..p {
            for j in 0..i {
                gram[i][j] = gram[j][i];
            }
            gram[i][i] += alpha;
        }

        let coefficients = linalg::solve(gram, rhs).ok_or(DomainError::SingularSystem)?;
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(w, m)| w * m)
                .sum::<f64>();

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Vec<f64> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }
}
