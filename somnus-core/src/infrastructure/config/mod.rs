// somnus-core/src/infrastructure/config/mod.rs

pub mod project;

pub use project::{
    AcquisitionConfig, CONFIG_FILE, PathsConfig, PipelineConfig, load_pipeline_config,
};
