// somnus-core/src/infrastructure/config/project.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::domain::cleaning::SplitConfig;
use crate::domain::modeling::ModelConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::fetcher::RetryPolicy;

pub const CONFIG_FILE: &str = "somnus.yaml";

pub const ENV_SEED: &str = "SOMNUS_SEED";
pub const ENV_TEST_FRACTION: &str = "SOMNUS_TEST_FRACTION";
pub const ENV_RESULTS_DIR: &str = "SOMNUS_RESULTS_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    #[validate(nested)]
    #[serde(default)]
    pub split: SplitConfig,

    #[validate(nested)]
    #[serde(default)]
    pub model: ModelConfig,

    #[validate(nested)]
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AcquisitionConfig {
    /// URL or local path `run` acquires from before cleaning. `None` means
    /// the raw file is expected to be in place already.
    #[serde(default)]
    pub source: Option<String>,

    #[validate(nested)]
    #[serde(flatten)]
    pub retry: RetryPolicy,

    #[validate(range(min = 1, message = "timeout must be at least one second"))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            source: None,
            retry: RetryPolicy::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Artifact locations, relative to the project directory unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub raw: PathBuf,
    pub processed: PathBuf,
    pub results: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw: PathBuf::from("data/raw/sleep_data_raw.csv"),
            processed: PathBuf::from("data/processed/sleep_data_clean.csv"),
            results: PathBuf::from("results"),
        }
    }
}

impl PathsConfig {
    pub fn raw_in(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.raw)
    }

    pub fn processed_in(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.processed)
    }

    pub fn results_in(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.results)
    }

    /// `<results>/model_analysis`, the prefix of every modeling artifact.
    pub fn model_prefix_in(&self, project_dir: &Path) -> PathBuf {
        self.results_in(project_dir).join("model_analysis")
    }
}

pub fn resolve(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

// --- LOADER ---

/// Defaults, then `somnus.yaml` if present, then `SOMNUS_*` variables.
/// Command-line flags are layered on top by the caller.
#[instrument(skip(project_dir))]
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    load_with_env(project_dir, |key| std::env::var(key).ok())
}

fn load_with_env<F>(project_dir: &Path, env: F) -> Result<PipelineConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = project_dir.join(CONFIG_FILE);

    let mut config = if config_path.exists() {
        info!(path = ?config_path, "Loading pipeline configuration");
        let content = fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            PipelineConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        }
    } else {
        debug!("No {} found, using defaults", CONFIG_FILE);
        PipelineConfig::default()
    };

    apply_env_overrides(&mut config, env)?;
    config.validate()?;
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut PipelineConfig, env: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env(ENV_SEED) {
        let seed = val.trim().parse::<u64>().map_err(|_| invalid_env(ENV_SEED, &val))?;
        info!(old = config.split.seed, new = seed, "Overriding seed via ENV");
        config.split.seed = seed;
    }
    if let Some(val) = env(ENV_TEST_FRACTION) {
        let fraction = val
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_env(ENV_TEST_FRACTION, &val))?;
        info!(
            old = config.split.test_fraction,
            new = fraction,
            "Overriding test fraction via ENV"
        );
        config.split.test_fraction = fraction;
    }
    if let Some(val) = env(ENV_RESULTS_DIR) {
        info!(old = ?config.paths.results, new = ?val, "Overriding results dir via ENV");
        config.paths.results = PathBuf::from(val);
    }
    Ok(())
}

fn invalid_env(key: &str, val: &str) -> InfrastructureError {
    InfrastructureError::ConfigError(format!("{} has an invalid value: '{}'", key, val))
}
