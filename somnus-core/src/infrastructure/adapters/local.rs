// somnus-core/src/infrastructure/adapters/local.rs

use async_trait::async_trait;
use std::io::ErrorKind;

use crate::ports::fetcher::{FetchOutcome, Fetcher};

/// Reads a raw dataset from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFetcher;

#[async_trait]
impl Fetcher for LocalFetcher {
    async fn fetch(&self, location: &str) -> FetchOutcome {
        match tokio::fs::read(location).await {
            Ok(bytes) => FetchOutcome::Fetched(bytes),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
                FetchOutcome::NotFound(location.to_string())
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => FetchOutcome::Rejected {
                status: 403,
                location: location.to_string(),
            },
            Err(e) => FetchOutcome::Transient(e.to_string()),
        }
    }
}

/// `true` when `location` should go through HTTP rather than the disk.
pub fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
