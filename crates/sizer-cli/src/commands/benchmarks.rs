use sizer_core::BenchmarkConfig;

use crate::OutputFormat;

/// Print the configuration in effect, in a form `--benchmarks` accepts back.
pub fn show(config: &BenchmarkConfig, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", config.to_toml_string()?),
        OutputFormat::Json | OutputFormat::Export => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}
