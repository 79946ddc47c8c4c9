use sizer_core::input::{RawDataVolume, RawEventFrequency, RawScheduled, RawTriggered, RawUltra};
use sizer_core::{BenchmarkConfig, CalculationResult, WorkloadInput, calculate};

use crate::OutputFormat;

pub fn triggered(config: &BenchmarkConfig, format: OutputFormat, raw: RawTriggered) -> anyhow::Result<()> {
    render(format, &calculate(config, &WorkloadInput::Triggered(raw.resolve())))
}

pub fn ultra(config: &BenchmarkConfig, format: OutputFormat, raw: RawUltra) -> anyhow::Result<()> {
    render(format, &calculate(config, &WorkloadInput::Ultra(raw.resolve())))
}

pub fn scheduled(config: &BenchmarkConfig, format: OutputFormat, raw: RawScheduled) -> anyhow::Result<()> {
    render(format, &calculate(config, &WorkloadInput::Scheduled(raw.resolve())))
}

pub fn event_frequency(
    config: &BenchmarkConfig,
    format: OutputFormat,
    raw: RawEventFrequency,
) -> anyhow::Result<()> {
    let input = WorkloadInput::HeadlessEventFrequency(raw.resolve());
    render(format, &calculate(config, &input))
}

pub fn data_volume(config: &BenchmarkConfig, format: OutputFormat, raw: RawDataVolume) -> anyhow::Result<()> {
    let input = WorkloadInput::HeadlessDataVolume(raw.resolve());
    render(format, &calculate(config, &input))
}

fn render(format: OutputFormat, result: &CalculationResult) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Export => println!("{}", serde_json::to_string_pretty(&sizer_report::export(result))?),
        OutputFormat::Text => println!("{}", sizer_report::format_result(None, result)),
    }
    Ok(())
}
