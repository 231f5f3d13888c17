// somnus-core/src/infrastructure/adapters/mod.rs

pub mod csv;
pub mod http;
pub mod local;

pub use http::HttpFetcher;
pub use local::{LocalFetcher, is_remote};
