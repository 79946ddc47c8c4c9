use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sizer_core::models::{BatchUnit, HeadlessMode};
use sizer_core::{ComplexityTier, PredictionTarget, TimeUnit};

mod commands;

#[derive(Parser)]
#[command(
    name = "sizer",
    about = "Workload node sizer: execution node estimates from business volumes",
    version,
    propagate_version = true,
)]
struct Cli {
    /// TOML file overriding benchmark constants and HA policy
    #[arg(short, long, global = true)]
    benchmarks: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    /// Self-describing document with explanations and a field glossary
    Export,
}

/// Numeric flags are taken as text; unparsable values fall back to the
/// field's default with a warning.
#[derive(Subcommand)]
enum Commands {
    /// Size a Triggered (request/response) workload
    Triggered {
        /// Request volume per --unit
        #[arg(short, long)]
        requests: Option<String>,
        #[arg(short, long)]
        unit: Option<TimeUnit>,
        /// Active days per month
        #[arg(long)]
        coverage_days: Option<String>,
        /// Active hours per day
        #[arg(long)]
        coverage_hours: Option<String>,
        /// Peak load as a percentage of average (150 = 1.5x)
        #[arg(short, long)]
        peak: Option<String>,
        /// simple, moderate, complex, veryComplex
        #[arg(short, long)]
        complexity: Option<ComplexityTier>,
    },
    /// Size an Ultra (low-latency) workload: Execution and FeedMaster nodes
    Ultra {
        #[arg(short, long)]
        requests: Option<String>,
        #[arg(short, long)]
        unit: Option<TimeUnit>,
        #[arg(long)]
        coverage_days: Option<String>,
        #[arg(long)]
        coverage_hours: Option<String>,
        #[arg(short, long)]
        peak: Option<String>,
        #[arg(short, long)]
        complexity: Option<ComplexityTier>,
    },
    /// Size a Scheduled (batch) workload
    Scheduled {
        /// Batch size in --batch-unit
        #[arg(short = 's', long)]
        batch_size: Option<String>,
        /// GB or Rows
        #[arg(long)]
        batch_unit: Option<BatchUnit>,
        /// Hours available to finish the batch
        #[arg(short, long)]
        window_hours: Option<String>,
        /// Transformation cost factor; must be positive
        #[arg(short = 'm', long)]
        complexity_multiplier: Option<String>,
    },
    /// Size a Headless (event pipeline) workload
    Headless {
        #[command(subcommand)]
        mode: HeadlessCommand,
    },
    /// Throughput a given node count supports, per complexity tier
    ///
    /// Targets: triggered, ultra, scheduled, headless (event frequency),
    /// headless:data-volume.
    Predict {
        target: PredictionTarget,
        /// Node count
        #[arg(short, long)]
        nodes: Option<String>,
    },
    /// Convert a volume between time units on a fixed calendar
    Rescale {
        value: String,
        #[arg(long)]
        from: TimeUnit,
        #[arg(long)]
        to: TimeUnit,
    },
    /// Size every workload in a TOML workload file and total the fleet
    Plan {
        path: PathBuf,
    },
    /// Print the effective benchmark configuration as TOML
    Benchmarks,
}

#[derive(Subcommand)]
enum HeadlessCommand {
    /// Size by event rate (micro-batching on)
    EventFrequency {
        #[arg(short, long)]
        events: Option<String>,
        #[arg(short, long)]
        unit: Option<TimeUnit>,
        #[arg(long)]
        coverage_hours: Option<String>,
        #[arg(short, long)]
        peak: Option<String>,
    },
    /// Size by data volume (micro-batching off)
    DataVolume {
        #[arg(short, long)]
        events_per_day: Option<String>,
        /// Average message size in bytes
        #[arg(short, long)]
        message_size: Option<String>,
        #[arg(long)]
        coverage_hours: Option<String>,
        #[arg(short, long)]
        peak: Option<String>,
        #[arg(short = 'x', long)]
        complexity_multiplier: Option<String>,
    },
}

impl HeadlessCommand {
    fn mode(&self) -> HeadlessMode {
        match self {
            HeadlessCommand::EventFrequency { .. } => HeadlessMode::EventFrequency,
            HeadlessCommand::DataVolume { .. } => HeadlessMode::DataVolume,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json)?;

    let config = commands::load_benchmarks(cli.benchmarks.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Triggered {
            requests,
            unit,
            coverage_days,
            coverage_hours,
            peak,
            complexity,
        } => commands::size::triggered(
            &config,
            format,
            sizer_core::input::RawTriggered {
                name: None,
                requests: requests.map(Into::into),
                unit,
                coverage_days: coverage_days.map(Into::into),
                coverage_hours: coverage_hours.map(Into::into),
                peak_load_pct: peak.map(Into::into),
                complexity,
            },
        ),
        Commands::Ultra {
            requests,
            unit,
            coverage_days,
            coverage_hours,
            peak,
            complexity,
        } => commands::size::ultra(
            &config,
            format,
            sizer_core::input::RawUltra {
                name: None,
                requests: requests.map(Into::into),
                unit,
                coverage_days: coverage_days.map(Into::into),
                coverage_hours: coverage_hours.map(Into::into),
                peak_load_pct: peak.map(Into::into),
                complexity,
            },
        ),
        Commands::Scheduled {
            batch_size,
            batch_unit,
            window_hours,
            complexity_multiplier,
        } => commands::size::scheduled(
            &config,
            format,
            sizer_core::input::RawScheduled {
                name: None,
                batch_size: batch_size.map(Into::into),
                batch_unit,
                process_window_hours: window_hours.map(Into::into),
                complexity_multiplier: complexity_multiplier.map(Into::into),
            },
        ),
        Commands::Headless { mode } => {
            tracing::debug!(mode = %mode.mode(), "headless sizing requested");
            match mode {
                HeadlessCommand::EventFrequency {
                    events,
                    unit,
                    coverage_hours,
                    peak,
                } => commands::size::event_frequency(
                    &config,
                    format,
                    sizer_core::input::RawEventFrequency {
                        name: None,
                        events: events.map(Into::into),
                        unit,
                        coverage_hours: coverage_hours.map(Into::into),
                        peak_load_pct: peak.map(Into::into),
                    },
                ),
                HeadlessCommand::DataVolume {
                    events_per_day,
                    message_size,
                    coverage_hours,
                    peak,
                    complexity_multiplier,
                } => commands::size::data_volume(
                    &config,
                    format,
                    sizer_core::input::RawDataVolume {
                        name: None,
                        events_per_day: events_per_day.map(Into::into),
                        message_size_bytes: message_size.map(Into::into),
                        coverage_hours: coverage_hours.map(Into::into),
                        peak_load_pct: peak.map(Into::into),
                        complexity_multiplier: complexity_multiplier.map(Into::into),
                    },
                ),
            }
        }
        Commands::Predict { target, nodes } => {
            commands::predict::predict(&config, format, target, nodes.map(Into::into))
        }
        Commands::Rescale { value, from, to } => commands::rescale::rescale(format, &value, from, to),
        Commands::Plan { path } => commands::plan::plan(&config, format, &path),
        Commands::Benchmarks => commands::benchmarks::show(&config, format),
    }
}

/// Logs go to stderr so stdout stays parseable in JSON formats.
/// `RUST_LOG` overrides the default `info` level.
fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new("sizer=info,sizer_core=info"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().try_init().map_err(|e| anyhow::anyhow!(e))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sizer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn triggered_flags_parse() {
        let cli = parse(&["triggered", "-r", "1000000", "-u", "perYear", "-p", "150", "-c", "veryComplex"]);
        let Commands::Triggered { requests, unit, complexity, .. } = cli.command else {
            panic!("expected triggered");
        };
        assert_eq!(requests.as_deref(), Some("1000000"));
        assert_eq!(unit, Some(TimeUnit::PerYear));
        assert_eq!(complexity, Some(ComplexityTier::VeryComplex));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn malformed_numbers_still_parse_as_text() {
        let cli = parse(&["scheduled", "--batch-size", "lots"]);
        let Commands::Scheduled { batch_size, .. } = cli.command else {
            panic!("expected scheduled");
        };
        assert_eq!(batch_size.as_deref(), Some("lots"));
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = Cli::try_parse_from(["sizer", "triggered", "--unit", "perFortnight"]);
        assert!(err.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["predict", "headless:data-volume", "-n", "4", "--format", "json", "--log-json"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.log_json);
        let Commands::Predict { target, nodes } = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(target, PredictionTarget::Headless(HeadlessMode::DataVolume));
        assert_eq!(nodes.as_deref(), Some("4"));
    }

    #[test]
    fn headless_modes() {
        let cli = parse(&["headless", "data-volume", "-e", "10000000", "-x", "1.25"]);
        let Commands::Headless { mode } = cli.command else {
            panic!("expected headless");
        };
        assert_eq!(mode.mode(), HeadlessMode::DataVolume);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
