//! Ultra tasks: low-latency pipelines on Execution nodes fed by FeedMasters.
//!
//! FeedMaster nodes are sized from the *raw* Execution requirement times the
//! FeedMaster ratio, and that raw figure gets its own HA rounding. They are
//! never derived from the already-rounded Execution HA count.

use serde::Serialize;
use tracing::debug;

use crate::benchmarks::BenchmarkConfig;
use crate::ha::NodePlan;
use crate::input::defaults;
use crate::models::{RateCapacity, size_request_rate};
use crate::tier::ComplexityTier;
use crate::units::{TimeUnit, average_per_second};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UltraInput {
    pub requests: f64,
    pub unit: TimeUnit,
    pub coverage_days: f64,
    pub coverage_hours: f64,
    pub peak_load_pct: f64,
    pub complexity: ComplexityTier,
}

impl Default for UltraInput {
    fn default() -> Self {
        Self {
            requests: defaults::VOLUME,
            unit: defaults::ULTRA_UNIT,
            coverage_days: defaults::ULTRA_COVERAGE_DAYS,
            coverage_hours: defaults::ULTRA_COVERAGE_HOURS,
            peak_load_pct: defaults::PEAK_LOAD_PCT,
            complexity: ComplexityTier::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UltraResult {
    pub input: UltraInput,
    pub response_time: f64,
    pub avg_requests_per_second: f64,
    pub peak_requests_per_second: f64,
    pub exec_node_throughput: f64,
    pub exec_nodes: NodePlan,
    pub feed_master_nodes: NodePlan,
    /// Capacity of the HA Execution nodes; `None` when unbounded.
    pub capacity: Option<RateCapacity>,
}

pub fn calculate(config: &BenchmarkConfig, input: &UltraInput) -> UltraResult {
    let response_time = config.ultra.response_times.get(input.complexity);
    let avg = average_per_second(input.requests, input.unit, input.coverage_days, input.coverage_hours);
    let sizing = size_request_rate(
        &config.ha,
        avg,
        input.peak_load_pct,
        config.ultra.exec_requests_per_node_per_second,
        response_time,
    );
    let feed_master_nodes = feed_masters(config, &sizing.nodes);

    debug!(
        complexity = %input.complexity,
        peak_rps = sizing.peak_rate,
        raw_exec = sizing.nodes.raw,
        ha_exec = %sizing.nodes.ha,
        raw_feed_master = feed_master_nodes.raw,
        ha_feed_master = %feed_master_nodes.ha,
        "ultra sizing"
    );

    UltraResult {
        input: *input,
        response_time,
        avg_requests_per_second: avg,
        peak_requests_per_second: sizing.peak_rate,
        exec_node_throughput: sizing.node_throughput,
        exec_nodes: sizing.nodes,
        feed_master_nodes,
        capacity: sizing.capacity,
    }
}

/// FeedMaster plan from the raw Execution requirement.
pub fn feed_masters(config: &BenchmarkConfig, exec: &NodePlan) -> NodePlan {
    let ratio = config.ultra.feed_master_ratio;
    let raw = if ratio > 0.0 { exec.raw * ratio } else { 0.0 };
    config.ha.apply(raw)
}
