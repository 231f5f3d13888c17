// somnus-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(somnus::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Input file '{0}' not found")]
    #[diagnostic(code(somnus::infra::input_missing))]
    InputNotFound(String),

    // --- CSV ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(somnus::infra::csv),
        help("Every row must have as many fields as the header.")
    )]
    Csv(#[from] csv::Error),

    #[error("Malformed table: {0}")]
    #[diagnostic(code(somnus::infra::table))]
    Table(#[source] crate::domain::error::DomainError),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(somnus::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(somnus::infra::config_invalid))]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    // --- HTTP ---
    #[error("HTTP Client Error: {0}")]
    #[diagnostic(code(somnus::infra::http))]
    Http(#[from] reqwest::Error),

    // --- REPORTS ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(somnus::infra::json))]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("{0} not found")]
    #[diagnostic(
        code(somnus::acquisition::not_found),
        help("Check the URL or local path of the raw dataset.")
    )]
    NotFound(String),

    #[error("Request for {location} rejected with HTTP status {status}")]
    #[diagnostic(code(somnus::acquisition::rejected))]
    Rejected { status: u16, location: String },

    #[error("Giving up after {attempts} attempt(s): {last_reason}")]
    #[diagnostic(
        code(somnus::acquisition::exhausted),
        help("The source looks temporarily unavailable. Retry later or raise `acquisition.max_attempts`.")
    )]
    Exhausted { attempts: u32, last_reason: String },
}
