// somnus/src/commands/mod.rs

pub mod clean;
pub mod download;
pub mod eda;
pub mod model;
pub mod run;

use somnus_core::SomnusError;

/// User-facing failure line, then exit status 1 for scripts and CI.
pub(crate) fn fail(stage: &str, err: &SomnusError) -> ! {
    eprintln!("❌ {} failed: {}", stage, err);
    std::process::exit(1);
}
