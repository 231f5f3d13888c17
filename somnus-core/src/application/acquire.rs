// somnus-core/src/application/acquire.rs
//
// USE CASE: fetch the raw dataset (URL or local path) and store it as CSV.

use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::error::SomnusError;
use crate::infrastructure::adapters::csv::{read_table_from, write_table};
use crate::infrastructure::adapters::{HttpFetcher, LocalFetcher, is_remote};
use crate::infrastructure::error::{AcquisitionError, InfrastructureError};
use crate::ports::fetcher::{FetchOutcome, Fetcher, RetryPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireReport {
    pub attempts: u32,
    pub rows: usize,
    pub columns: usize,
}

/// HTTP for `http(s)://` locations, the local disk otherwise.
pub fn fetcher_for(
    location: &str,
    timeout: Duration,
) -> Result<Box<dyn Fetcher>, InfrastructureError> {
    if is_remote(location) {
        Ok(Box::new(HttpFetcher::new(timeout)?))
    } else {
        Ok(Box::new(LocalFetcher))
    }
}

/// Fetches `location`, retrying only transient failures with exponential
/// backoff. Returns the payload and the number of attempts it took.
#[instrument(skip(fetcher, policy))]
pub async fn fetch_with_retry(
    fetcher: &dyn Fetcher,
    location: &str,
    policy: &RetryPolicy,
) -> Result<(Vec<u8>, u32), AcquisitionError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_reason = String::new();

    for attempt in 1..=max_attempts {
        match fetcher.fetch(location).await {
            FetchOutcome::Fetched(bytes) => return Ok((bytes, attempt)),
            FetchOutcome::NotFound(location) => return Err(AcquisitionError::NotFound(location)),
            FetchOutcome::Rejected { status, location } => {
                return Err(AcquisitionError::Rejected { status, location });
            }
            FetchOutcome::Transient(reason) => {
                warn!(attempt, max_attempts, %reason, "Transient fetch failure");
                last_reason = reason;
                if attempt < max_attempts {
                    tokio::time::sleep(policy.backoff(attempt)).await;
                }
            }
        }
    }

    Err(AcquisitionError::Exhausted {
        attempts: max_attempts,
        last_reason,
    })
}

/// Fetches the raw dataset, checks it parses as CSV and writes it to
/// `output` (parent directories created, no index column).
#[instrument(skip(fetcher, policy), fields(output = %output.display()))]
pub async fn acquire(
    fetcher: &dyn Fetcher,
    location: &str,
    output: &Path,
    policy: &RetryPolicy,
) -> Result<AcquireReport, SomnusError> {
    let (bytes, attempts) = fetch_with_retry(fetcher, location, policy).await?;
    let table = read_table_from(bytes.as_slice())?;
    write_table(&table, output)?;

    info!(attempts, rows = table.len(), "Raw dataset stored");
    Ok(AcquireReport {
        attempts,
        rows: table.len(),
        columns: table.width(),
    })
}
