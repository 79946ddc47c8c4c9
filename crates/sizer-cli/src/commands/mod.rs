pub mod benchmarks;
pub mod plan;
pub mod predict;
pub mod rescale;
pub mod size;

use std::path::Path;

use sizer_core::BenchmarkConfig;

/// Built-in benchmarks, or the overrides at `path`.
pub fn load_benchmarks(path: Option<&Path>) -> anyhow::Result<BenchmarkConfig> {
    match path {
        Some(path) => Ok(BenchmarkConfig::from_file(path)?),
        None => Ok(BenchmarkConfig::default()),
    }
}
