// somnus/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "somnus")]
#[command(about = "Sleep health analysis pipeline: acquire, clean, explore, model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project directory (holds somnus.yaml, data/ and results/)
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📥 Downloads (or copies) the raw dataset and stores it as CSV
    Download {
        /// URL or local path of the raw CSV
        #[arg(long)]
        input_path: String,

        /// Where to save the CSV
        #[arg(long)]
        output_path: PathBuf,
    },

    /// 🧹 Cleans the raw dataset and adds the train/test flag
    Clean {
        /// Raw CSV (default: paths.raw, data/raw/sleep_data_raw.csv)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Cleaned CSV (default: paths.processed, data/processed/sleep_data_clean.csv)
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Seed of the train/test shuffle (default: split.seed, 522)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// 📊 Summarizes the training subset of the cleaned dataset
    Eda {
        /// Cleaned CSV (default: paths.processed)
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Directory receiving eda_summary.json / .txt (default: paths.results)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// 🤖 Cross-validates, fits and evaluates the stress model
    Model {
        /// Cleaned CSV (default: paths.processed)
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Prefix of the result files (default: results/model_analysis)
        #[arg(long)]
        output_prefix: Option<PathBuf>,
    },

    /// 🚀 Runs the whole pipeline (download -> clean -> eda -> model)
    Run {
        /// URL or local path to acquire first (default: acquisition.source)
        #[arg(long)]
        input_path: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_clean_defaults() -> Result<()> {
        let args = Cli::parse_from(["somnus", "clean"]);
        assert_eq!(args.project_dir.to_string_lossy(), ".");
        match args.command {
            Commands::Clean { source, dest, seed } => {
                assert_eq!(source, None);
                assert_eq!(dest, None);
                assert_eq!(seed, None);
                Ok(())
            }
            _ => bail!("Expected Clean command"),
        }
    }

    #[test]
    fn test_cli_parse_clean_overrides() -> Result<()> {
        let args = Cli::parse_from([
            "somnus",
            "clean",
            "--source",
            "raw.csv",
            "--dest",
            "out/clean.csv",
            "--seed",
            "7",
            "--project-dir",
            "/tmp",
        ]);
        assert_eq!(args.project_dir.to_string_lossy(), "/tmp");
        match args.command {
            Commands::Clean { source, dest, seed } => {
                assert_eq!(source, Some(PathBuf::from("raw.csv")));
                assert_eq!(dest, Some(PathBuf::from("out/clean.csv")));
                assert_eq!(seed, Some(7));
                Ok(())
            }
            _ => bail!("Expected Clean command"),
        }
    }

    #[test]
    fn test_cli_parse_download_requires_paths() {
        assert!(Cli::try_parse_from(["somnus", "download", "--input-path", "x"]).is_err());
        assert!(
            Cli::try_parse_from([
                "somnus",
                "download",
                "--input-path",
                "https://example.org/sleep.csv",
                "--output-path",
                "data/raw/sleep.csv",
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_cli_parse_model_prefix() -> Result<()> {
        let args = Cli::parse_from(["somnus", "model", "--output-prefix", "results/m"]);
        match args.command {
            Commands::Model {
                input_file,
                output_prefix,
            } => {
                assert_eq!(input_file, None);
                assert_eq!(output_prefix, Some(PathBuf::from("results/m")));
                Ok(())
            }
            _ => bail!("Expected Model command"),
        }
    }

    #[test]
    fn test_cli_parse_run() -> Result<()> {
        let args = Cli::parse_from(["somnus", "run", "--input-path", "raw.csv"]);
        match args.command {
            Commands::Run { input_path } => {
                assert_eq!(input_path.as_deref(), Some("raw.csv"));
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }
}
