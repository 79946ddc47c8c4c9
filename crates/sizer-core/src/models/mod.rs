//! Model calculators.
//!
//! Four workload execution models, each a pure function of its typed input
//! and the [`BenchmarkConfig`]:
//!
//! - **`triggered`**: request/response tasks sized by request rate
//! - **`ultra`**: low-latency tasks; Execution plus FeedMaster nodes
//! - **`scheduled`**: batch tasks sized by data volume per window
//! - **`headless`**: event pipelines, by event frequency or data volume

pub mod headless;
pub mod scheduled;
pub mod triggered;
pub mod ultra;

use serde::Serialize;

use crate::benchmarks::BenchmarkConfig;
use crate::ha::{HaPolicy, NodeCount, NodePlan};

pub use headless::{DataVolumeInput, DataVolumeResult, EventFrequencyInput, EventFrequencyResult, HeadlessMode};
pub use scheduled::{BatchCapacity, BatchUnit, ScheduledInput, ScheduledResult};
pub use triggered::{TriggeredInput, TriggeredResult};
pub use ultra::{UltraInput, UltraResult};

/// Typed, already-defaulted input for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "camelCase")]
pub enum WorkloadInput {
    Triggered(TriggeredInput),
    Ultra(UltraInput),
    Scheduled(ScheduledInput),
    HeadlessEventFrequency(EventFrequencyInput),
    HeadlessDataVolume(DataVolumeInput),
}

/// Result of sizing one workload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "camelCase")]
pub enum CalculationResult {
    Triggered(TriggeredResult),
    Ultra(UltraResult),
    Scheduled(ScheduledResult),
    HeadlessEventFrequency(EventFrequencyResult),
    HeadlessDataVolume(DataVolumeResult),
}

impl CalculationResult {
    pub fn model_name(&self) -> &'static str {
        match self {
            CalculationResult::Triggered(_) => "triggered",
            CalculationResult::Ultra(_) => "ultra",
            CalculationResult::Scheduled(_) => "scheduled",
            CalculationResult::HeadlessEventFrequency(_) => "headless (event frequency)",
            CalculationResult::HeadlessDataVolume(_) => "headless (data volume)",
        }
    }

    /// Execution node plan. For Ultra this excludes FeedMaster nodes.
    pub fn execution_nodes(&self) -> &NodePlan {
        match self {
            CalculationResult::Triggered(r) => &r.nodes,
            CalculationResult::Ultra(r) => &r.exec_nodes,
            CalculationResult::Scheduled(r) => &r.nodes,
            CalculationResult::HeadlessEventFrequency(r) => &r.nodes,
            CalculationResult::HeadlessDataVolume(r) => &r.nodes,
        }
    }

    /// All node plans in the result, Execution first.
    pub fn node_plans(&self) -> Vec<&NodePlan> {
        match self {
            CalculationResult::Ultra(r) => vec![&r.exec_nodes, &r.feed_master_nodes],
            other => vec![other.execution_nodes()],
        }
    }

    /// Total non-HA nodes across every role.
    pub fn total_non_ha(&self) -> NodeCount {
        self.node_plans().into_iter().map(|p| p.non_ha).sum()
    }

    /// Total HA nodes across every role.
    pub fn total_ha(&self) -> NodeCount {
        self.node_plans().into_iter().map(|p| p.ha).sum()
    }
}

/// Size a workload with whichever model its input belongs to.
pub fn calculate(config: &BenchmarkConfig, input: &WorkloadInput) -> CalculationResult {
    match input {
        WorkloadInput::Triggered(i) => CalculationResult::Triggered(triggered::calculate(config, i)),
        WorkloadInput::Ultra(i) => CalculationResult::Ultra(ultra::calculate(config, i)),
        WorkloadInput::Scheduled(i) => CalculationResult::Scheduled(scheduled::calculate(config, i)),
        WorkloadInput::HeadlessEventFrequency(i) => {
            CalculationResult::HeadlessEventFrequency(headless::calculate_event_frequency(config, i))
        }
        WorkloadInput::HeadlessDataVolume(i) => {
            CalculationResult::HeadlessDataVolume(headless::calculate_data_volume(config, i))
        }
    }
}

/// Maximum HA capacity and how far it exceeds peak and average load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateCapacity {
    pub max_capacity: f64,
    pub headroom_vs_peak_pct: f64,
    pub headroom_vs_average_pct: f64,
}

impl RateCapacity {
    pub(crate) fn new(max_capacity: f64, peak: f64, average: f64) -> Self {
        Self {
            max_capacity,
            headroom_vs_peak_pct: headroom_pct(max_capacity, peak),
            headroom_vs_average_pct: headroom_pct(max_capacity, average),
        }
    }
}

/// Percentage by which `capacity` exceeds `reference`; 0 unless the
/// reference is strictly positive.
pub(crate) fn headroom_pct(capacity: f64, reference: f64) -> f64 {
    if reference > 0.0 {
        (capacity / reference - 1.0) * 100.0
    } else {
        0.0
    }
}

/// Sizing of a request-rate workload (Triggered, Ultra, Event-Frequency).
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestSizing {
    pub peak_rate: f64,
    pub node_throughput: f64,
    pub nodes: NodePlan,
    pub capacity: Option<RateCapacity>,
}

/// ```text
/// peak       = average * peak_pct / 100
/// throughput = response_time > 0 ? requests_per_node / response_time : 0
/// raw        = throughput > 0 ? peak / throughput : +inf
/// ```
///
/// The requirement is unbounded when per-node throughput is zero, and also
/// when the peak rate overflows to `+inf`. Capacity is `None` in both cases.
pub(crate) fn size_request_rate(
    ha: &HaPolicy,
    average_rate: f64,
    peak_load_pct: f64,
    requests_per_node_per_second: f64,
    response_time: f64,
) -> RequestSizing {
    let peak_rate = average_rate * (peak_load_pct / 100.0);
    let node_throughput = if response_time > 0.0 {
        requests_per_node_per_second / response_time
    } else {
        0.0
    };
    let raw = if node_throughput > 0.0 {
        peak_rate / node_throughput
    } else {
        f64::INFINITY
    };

    let nodes = ha.apply(raw);
    let capacity = nodes
        .ha
        .finite()
        .map(|ha_nodes| RateCapacity::new(ha_nodes as f64 * node_throughput, peak_rate, average_rate));

    RequestSizing {
        peak_rate,
        node_throughput,
        nodes,
        capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headroom_is_zero_without_load() {
        assert_eq!(headroom_pct(40.0, 0.0), 0.0);
        assert_eq!(headroom_pct(40.0, -1.0), 0.0);
    }

    #[test]
    fn headroom_is_relative_excess() {
        assert!((headroom_pct(30.0, 20.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_response_time_is_unbounded() {
        let sizing = size_request_rate(&HaPolicy::default(), 5.0, 100.0, 20.0, 0.0);
        assert_eq!(sizing.node_throughput, 0.0);
        assert!(sizing.nodes.is_unbounded());
        assert!(sizing.capacity.is_none());
    }

    #[test]
    fn overflowing_peak_counts_as_unbounded() {
        let sizing = size_request_rate(&HaPolicy::default(), f64::MAX, 200.0, 20.0, 2.5);
        assert_eq!(sizing.peak_rate, f64::INFINITY);
        assert_eq!(sizing.node_throughput, 8.0);
        assert!(sizing.nodes.is_unbounded());
        assert!(sizing.capacity.is_none());
    }

    #[test]
    fn zero_load_still_gets_min_floor() {
        let sizing = size_request_rate(&HaPolicy::default(), 0.0, 150.0, 20.0, 2.5);
        assert_eq!(sizing.nodes.non_ha, NodeCount::Finite(0));
        assert_eq!(sizing.nodes.ha, NodeCount::Finite(2));
        let capacity = sizing.capacity.unwrap();
        assert_eq!(capacity.max_capacity, 16.0);
        assert_eq!(capacity.headroom_vs_peak_pct, 0.0);
        assert_eq!(capacity.headroom_vs_average_pct, 0.0);
    }

    #[test]
    fn calculate_dispatches_by_model() {
        let config = BenchmarkConfig::default();
        let input = WorkloadInput::Scheduled(ScheduledInput {
            batch_size: 300.0,
            batch_unit: BatchUnit::Gb,
            process_window_hours: 12.0,
            complexity_multiplier: 1.5,
        });
        let result = calculate(&config, &input);
        assert_eq!(result.model_name(), "scheduled");
        assert_eq!(result.execution_nodes().ha, NodeCount::Finite(3));
    }

    #[test]
    fn ultra_totals_include_feed_masters() {
        let config = BenchmarkConfig::default();
        let input = WorkloadInput::Ultra(UltraInput {
            requests: 0.0,
            ..UltraInput::default()
        });
        let result = calculate(&config, &input);
        // Exec HA 2 + FeedMaster HA 2.
        assert_eq!(result.total_ha(), NodeCount::Finite(4));
        assert_eq!(result.total_non_ha(), NodeCount::Finite(0));
    }

    #[test]
    fn result_serializes_with_model_tag() {
        let config = BenchmarkConfig::default();
        let result = calculate(&config, &WorkloadInput::Triggered(TriggeredInput::default()));
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["model"], "triggered");
        assert_eq!(json["nodes"]["ha"], 2);
    }
}
