//! Triggered tasks: request/response pipelines sized by peak request rate.

use serde::Serialize;
use tracing::debug;

use crate::benchmarks::BenchmarkConfig;
use crate::ha::NodePlan;
use crate::input::defaults;
use crate::models::{RateCapacity, size_request_rate};
use crate::tier::ComplexityTier;
use crate::units::{TimeUnit, average_per_second};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriggeredInput {
    /// Request volume per `unit`.
    pub requests: f64,
    pub unit: TimeUnit,
    pub coverage_days: f64,
    pub coverage_hours: f64,
    pub peak_load_pct: f64,
    pub complexity: ComplexityTier,
}

impl Default for TriggeredInput {
    fn default() -> Self {
        Self {
            requests: defaults::VOLUME,
            unit: defaults::TRIGGERED_UNIT,
            coverage_days: defaults::TRIGGERED_COVERAGE_DAYS,
            coverage_hours: defaults::TRIGGERED_COVERAGE_HOURS,
            peak_load_pct: defaults::PEAK_LOAD_PCT,
            complexity: ComplexityTier::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriggeredResult {
    pub input: TriggeredInput,
    /// Assumed response time in seconds for the selected tier.
    pub response_time: f64,
    pub avg_requests_per_second: f64,
    pub peak_requests_per_second: f64,
    pub node_throughput: f64,
    pub nodes: NodePlan,
    /// `None` when the requirement is unbounded.
    pub capacity: Option<RateCapacity>,
}

pub fn calculate(config: &BenchmarkConfig, input: &TriggeredInput) -> TriggeredResult {
    let response_time = config.triggered.response_times.get(input.complexity);
    let avg = average_per_second(input.requests, input.unit, input.coverage_days, input.coverage_hours);
    let sizing = size_request_rate(
        &config.ha,
        avg,
        input.peak_load_pct,
        config.triggered.requests_per_node_per_second,
        response_time,
    );

    debug!(
        complexity = %input.complexity,
        avg_rps = avg,
        peak_rps = sizing.peak_rate,
        raw_nodes = sizing.nodes.raw,
        ha_nodes = %sizing.nodes.ha,
        "triggered sizing"
    );

    TriggeredResult {
        input: *input,
        response_time,
        avg_requests_per_second: avg,
        peak_requests_per_second: sizing.peak_rate,
        node_throughput: sizing.node_throughput,
        nodes: sizing.nodes,
        capacity: sizing.capacity,
    }
}
