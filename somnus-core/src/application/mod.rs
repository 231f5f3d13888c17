// somnus-core/src/application/mod.rs

pub mod acquire;
pub mod clean;
pub mod eda;
pub mod model;
pub mod pipeline;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use somnus_core::application::{clean_dataset, run_eda};`
// without knowing the file layout.

pub use acquire::{AcquireReport, acquire, fetch_with_retry, fetcher_for};
pub use clean::clean_dataset;
pub use eda::{EDA_JSON, EDA_TEXT, EdaArtifacts, EdaReport, run_eda};
pub use model::{ModelArtifacts, artifact_path, run_model};
pub use pipeline::{PipelineOutcome, run_pipeline};
