// somnus-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts the application needs from the outside world (raw data fetching).
pub mod ports;

// 2. Domain (business core)
// Typed table, cleaning + split contract, EDA statistics, baseline model.
// Depends on nothing else in the crate (no infra, no app).
pub mod domain;

// 3. Infrastructure (Adapters)
// CSV files, HTTP/local fetchers, YAML config, text-table rendering.
pub mod infrastructure;

// 4. Application (Use Cases)
// Acquire -> Clean -> {EDA, Model}, each one reading/writing artifacts.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use domain::cleaning::{CleanedTable, clean};
pub use domain::table::{Column, DataType, Table, Value};
pub use error::SomnusError;
