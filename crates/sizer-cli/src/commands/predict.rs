use sizer_core::input::{defaults, resolve};
use sizer_core::{BenchmarkConfig, PredictionTarget, RawNumber};

use crate::OutputFormat;

pub fn predict(
    config: &BenchmarkConfig,
    format: OutputFormat,
    target: PredictionTarget,
    nodes: Option<RawNumber>,
) -> anyhow::Result<()> {
    let node_count = resolve("predict.nodes", nodes.as_ref(), defaults::NODE_COUNT);
    let prediction = sizer_core::predict(config, target, node_count);

    match format {
        OutputFormat::Json | OutputFormat::Export => {
            println!("{}", serde_json::to_string_pretty(&prediction)?)
        }
        OutputFormat::Text => println!("{}", sizer_report::format_prediction(&prediction)),
    }
    Ok(())
}
