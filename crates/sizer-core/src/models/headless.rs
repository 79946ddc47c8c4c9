//! Headless tasks: event pipelines without a request/response caller.
//!
//! Two sizing methods:
//!
//! - **Event frequency** (micro-batching on): event rate against a fixed
//!   per-node event throughput. No complexity dimension. The unit's context
//!   days (30.42 per month, 365 per year, 1 otherwise) stand in for coverage
//!   days. Only `perMonth` reads them; `perYear` keeps the fixed 360-day year
//!   and reports 365 for display.
//! - **Data volume** (micro-batching off): message bytes per day against a
//!   per-node MB/min rate, scaled by a free complexity multiplier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::BenchmarkConfig;
use crate::error::SizerError;
use crate::ha::NodePlan;
use crate::input::{defaults, positive_or};
use crate::models::{RateCapacity, size_request_rate};
use crate::units::{TimeUnit, average_per_second};

const MB_PER_GB: f64 = 1024.0;
const MINUTES_PER_HOUR: f64 = 60.0;
/// Reported for `perYear` event volumes. Not a rate input.
pub const YEAR_CONTEXT_DAYS: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeadlessMode {
    EventFrequency,
    DataVolume,
}

impl HeadlessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadlessMode::EventFrequency => "eventFrequency",
            HeadlessMode::DataVolume => "dataVolume",
        }
    }
}

impl fmt::Display for HeadlessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadlessMode {
    type Err = SizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "eventfrequency" | "events" => Ok(HeadlessMode::EventFrequency),
            "datavolume" | "volume" => Ok(HeadlessMode::DataVolume),
            _ => Err(SizerError::UnknownHeadlessMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventFrequencyInput {
    pub events: f64,
    pub unit: TimeUnit,
    pub coverage_hours: f64,
    pub peak_load_pct: f64,
}

impl Default for EventFrequencyInput {
    fn default() -> Self {
        Self {
            events: defaults::VOLUME,
            unit: defaults::EVENT_FREQUENCY_UNIT,
            coverage_hours: defaults::HEADLESS_COVERAGE_HOURS,
            peak_load_pct: defaults::PEAK_LOAD_PCT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventFrequencyResult {
    pub input: EventFrequencyInput,
    /// Days the stated volume is spread over for this unit.
    pub context_days: f64,
    pub avg_events_per_second: f64,
    pub peak_events_per_second: f64,
    pub node_throughput: f64,
    pub nodes: NodePlan,
    pub capacity: Option<RateCapacity>,
}

/// Days-per-unit context for event-frequency volumes.
pub fn context_days(config: &BenchmarkConfig, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::PerMonth => config.headless.days_per_month,
        TimeUnit::PerYear => YEAR_CONTEXT_DAYS,
        _ => 1.0,
    }
}

pub fn calculate_event_frequency(
    config: &BenchmarkConfig,
    input: &EventFrequencyInput,
) -> EventFrequencyResult {
    let days = context_days(config, input.unit);
    let avg = average_per_second(input.events, input.unit, days, input.coverage_hours);
    let sizing = size_request_rate(
        &config.ha,
        avg,
        input.peak_load_pct,
        config.headless.requests_per_node_per_second,
        config.headless.fixed_response_time,
    );

    debug!(
        unit = %input.unit,
        context_days = days,
        peak_eps = sizing.peak_rate,
        raw_nodes = sizing.nodes.raw,
        ha_nodes = %sizing.nodes.ha,
        "headless event-frequency sizing"
    );

    EventFrequencyResult {
        input: *input,
        context_days: days,
        avg_events_per_second: avg,
        peak_events_per_second: sizing.peak_rate,
        node_throughput: sizing.node_throughput,
        nodes: sizing.nodes,
        capacity: sizing.capacity,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataVolumeInput {
    pub events_per_day: f64,
    pub message_size_bytes: f64,
    pub coverage_hours: f64,
    pub peak_load_pct: f64,
    pub complexity_multiplier: f64,
}

impl Default for DataVolumeInput {
    fn default() -> Self {
        Self {
            events_per_day: defaults::VOLUME,
            message_size_bytes: defaults::DATA_VOLUME_MESSAGE_BYTES,
            coverage_hours: defaults::HEADLESS_COVERAGE_HOURS,
            peak_load_pct: defaults::PEAK_LOAD_PCT,
            complexity_multiplier: defaults::DATA_VOLUME_COMPLEXITY_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataVolumeResult {
    pub input: DataVolumeInput,
    pub batch_gb_eq: f64,
    pub avg_mb_per_minute: f64,
    pub peak_mb_per_minute: f64,
    pub nodes: NodePlan,
    /// Capacity in MB/min. `None` when the requirement is unbounded.
    pub capacity: Option<RateCapacity>,
}

/// ```text
/// batch_gb_eq  = message_bytes * events_per_day / bytes_to_gb_eq_divisor
/// avg_mb_min   = hours > 0 ? batch_gb_eq * 1024 / (hours * 60) : 0
/// peak_mb_min  = avg_mb_min * peak_pct / 100
/// raw          = peak_mb_min > 0 ? peak_mb_min * multiplier / mb_per_node : 0
/// max_capacity = ha * mb_per_node / multiplier
/// ```
pub fn calculate_data_volume(config: &BenchmarkConfig, input: &DataVolumeInput) -> DataVolumeResult {
    let bench = &config.headless;
    let multiplier = positive_or(
        "data_volume.complexity_multiplier",
        input.complexity_multiplier,
        defaults::DATA_VOLUME_COMPLEXITY_MULTIPLIER,
    );

    let batch_gb_eq = (input.message_size_bytes * input.events_per_day) / bench.bytes_to_gb_eq_divisor;
    let avg_mb_per_minute = if input.coverage_hours > 0.0 {
        (batch_gb_eq * MB_PER_GB) / (input.coverage_hours * MINUTES_PER_HOUR)
    } else {
        0.0
    };
    let peak_mb_per_minute = avg_mb_per_minute * (input.peak_load_pct / 100.0);
    let raw = if peak_mb_per_minute > 0.0 {
        (peak_mb_per_minute * multiplier) / bench.mb_per_minute_per_node
    } else {
        0.0
    };

    let nodes = config.ha.apply(raw);
    let capacity = nodes.ha.finite().map(|ha_nodes| {
        let max_capacity = (ha_nodes as f64 * bench.mb_per_minute_per_node) / multiplier;
        RateCapacity::new(max_capacity, peak_mb_per_minute, avg_mb_per_minute)
    });

    debug!(
        batch_gb_eq,
        peak_mb_per_minute,
        raw_nodes = nodes.raw,
        ha_nodes = %nodes.ha,
        "headless data-volume sizing"
    );

    DataVolumeResult {
        input: DataVolumeInput {
            complexity_multiplier: multiplier,
            ..*input
        },
        batch_gb_eq,
        avg_mb_per_minute,
        peak_mb_per_minute,
        nodes,
        capacity,
    }
}
