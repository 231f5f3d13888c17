// somnus-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{AcquisitionError, InfrastructureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SomnusError {
    // --- DOMAIN ERRORS (schema contract, split, modeling) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, CSV, config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ACQUISITION (fetch / copy of the raw dataset) ---
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid a duplicate enum variant but keep `?` ergonomics
impl From<std::io::Error> for SomnusError {
    fn from(err: std::io::Error) -> Self {
        SomnusError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<csv::Error> for SomnusError {
    fn from(err: csv::Error) -> Self {
        SomnusError::Infrastructure(InfrastructureError::Csv(err))
    }
}

impl From<serde_json::Error> for SomnusError {
    fn from(err: serde_json::Error) -> Self {
        SomnusError::Infrastructure(InfrastructureError::Json(err))
    }
}
