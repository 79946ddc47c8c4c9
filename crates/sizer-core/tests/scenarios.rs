//! End-to-end sizing scenarios, driven from raw (user-typed) input through
//! defaulting, calculation, and prediction.

use sizer_core::input::{RawDataVolume, RawEventFrequency, RawScheduled, RawTriggered, RawUltra};
use sizer_core::models::{BatchUnit, HeadlessMode};
use sizer_core::{
    BenchmarkConfig, CalculationResult, ComplexityTier, NodeCount, PredictionTarget, RawNumber, TimeUnit,
    WorkloadInput, calculate, predict,
};

fn num(s: &str) -> Option<RawNumber> {
    Some(RawNumber::from(s))
}

fn close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} not within {tol} of {b}");
}

// ── Triggered ───────────────────────────────────────────────────────

#[test]
fn triggered_million_per_year() {
    let raw = RawTriggered {
        requests: num("1000000"),
        unit: Some(TimeUnit::PerYear),
        coverage_days: num("30"),
        coverage_hours: num("24"),
        peak_load_pct: num("150"),
        complexity: Some(ComplexityTier::Moderate),
        ..RawTriggered::default()
    };
    let result = calculate(&BenchmarkConfig::default(), &WorkloadInput::Triggered(raw.resolve()));

    let CalculationResult::Triggered(r) = result else {
        panic!("expected triggered result, got {}", result.model_name());
    };
    assert_eq!(r.response_time, 2.5);
    close(r.avg_requests_per_second, 1_000_000.0 / (360.0 * 24.0 * 3600.0), 1e-12);
    close(r.peak_requests_per_second, 0.04823, 1e-5);
    assert_eq!(r.node_throughput, 8.0);
    close(r.nodes.raw, 0.00603, 1e-5);
    assert_eq!(r.nodes.non_ha, NodeCount::Finite(1));
    assert_eq!(r.nodes.ha, NodeCount::Finite(2));
}

#[test]
fn triggered_zero_coverage_hours_is_floor_only() {
    let raw = RawTriggered {
        requests: num("1000000"),
        coverage_hours: num("0"),
        peak_load_pct: num("150"),
        ..RawTriggered::default()
    };
    let result = calculate(&BenchmarkConfig::default(), &WorkloadInput::Triggered(raw.resolve()));

    let CalculationResult::Triggered(r) = result else {
        panic!("expected triggered result");
    };
    assert_eq!(r.peak_requests_per_second, 0.0);
    assert_eq!(r.nodes.non_ha, NodeCount::Finite(0));
    assert_eq!(r.nodes.ha, NodeCount::Finite(2));
    let capacity = r.capacity.expect("finite plan has capacity");
    assert_eq!(capacity.headroom_vs_peak_pct, 0.0);
    assert_eq!(capacity.headroom_vs_average_pct, 0.0);
}

#[test]
fn triggered_malformed_text_falls_back_to_defaults() {
    let raw = RawTriggered {
        requests: num("lots"),
        coverage_hours: num(""),
        ..RawTriggered::default()
    };
    let input = raw.resolve();
    assert_eq!(input.requests, 0.0);
    assert_eq!(input.coverage_hours, 24.0);
}

// ── Ultra ───────────────────────────────────────────────────────────

#[test]
fn ultra_feed_masters_from_raw_exec() {
    let raw = RawUltra {
        requests: num("400"),
        unit: Some(TimeUnit::PerSecond),
        complexity: Some(ComplexityTier::Moderate),
        ..RawUltra::default()
    };
    let result = calculate(&BenchmarkConfig::default(), &WorkloadInput::Ultra(raw.resolve()));

    let CalculationResult::Ultra(r) = result else {
        panic!("expected ultra result");
    };
    assert_eq!(r.exec_nodes.raw, 4.0);
    assert_eq!(r.feed_master_nodes.raw, 2.0);
    assert_eq!(r.feed_master_nodes.non_ha, NodeCount::Finite(2));
    assert_eq!(r.feed_master_nodes.ha, NodeCount::Finite(3));
    assert_eq!(result.total_ha(), NodeCount::Finite(9));
}

// ── Scheduled ───────────────────────────────────────────────────────

#[test]
fn scheduled_three_hundred_gb() {
    let raw = RawScheduled {
        batch_size: num("300"),
        batch_unit: Some(BatchUnit::Gb),
        process_window_hours: num("12"),
        complexity_multiplier: num("1.5"),
        ..RawScheduled::default()
    };
    let result = calculate(&BenchmarkConfig::default(), &WorkloadInput::Scheduled(raw.resolve()));

    let CalculationResult::Scheduled(r) = result else {
        panic!("expected scheduled result");
    };
    close(r.mb_per_minute, 426.67, 1e-2);
    close(r.nodes.raw, 2.133, 1e-3);
    assert_eq!(r.nodes.non_ha, NodeCount::Finite(3));
    assert_eq!(r.nodes.ha, NodeCount::Finite(3));
}

#[test]
fn scheduled_zero_multiplier_is_replaced() {
    let raw = RawScheduled {
        batch_size: num("300"),
        complexity_multiplier: num("0"),
        ..RawScheduled::default()
    };
    assert_eq!(raw.resolve().complexity_multiplier, 1.5);
}

// ── Headless ────────────────────────────────────────────────────────

#[test]
fn headless_data_volume_ten_million_events() {
    let raw = RawDataVolume {
        events_per_day: num("10000000"),
        message_size_bytes: num("2000"),
        coverage_hours: num("24"),
        peak_load_pct: num("120"),
        complexity_multiplier: num("1.25"),
        ..RawDataVolume::default()
    };
    let result = calculate(&BenchmarkConfig::default(), &WorkloadInput::HeadlessDataVolume(raw.resolve()));

    let CalculationResult::HeadlessDataVolume(r) = result else {
        panic!("expected data-volume result");
    };
    close(r.batch_gb_eq, 2.0, 1e-12);
    close(r.avg_mb_per_minute, 1.4222, 1e-4);
    close(r.peak_mb_per_minute, 1.7067, 1e-4);
    close(r.nodes.raw, 0.01422, 1e-5);
    assert_eq!(r.nodes.non_ha, NodeCount::Finite(1));
    assert_eq!(r.nodes.ha, NodeCount::Finite(2));
}

#[test]
fn headless_event_frequency_has_no_tier() {
    let raw = RawEventFrequency {
        events: num("900"),
        unit: Some(TimeUnit::PerSecond),
        ..RawEventFrequency::default()
    };
    let result = calculate(
        &BenchmarkConfig::default(),
        &WorkloadInput::HeadlessEventFrequency(raw.resolve()),
    );
    assert_eq!(result.execution_nodes().non_ha, NodeCount::Finite(3));

    let prediction = predict(&BenchmarkConfig::default(), PredictionTarget::Headless(HeadlessMode::EventFrequency), 3.0);
    assert_eq!(prediction.rows.len(), 1);
    assert!(prediction.rows[0].tier.is_none());
}

// ── Prediction round trip ───────────────────────────────────────────

#[test]
fn predicted_capacity_covers_sized_peak() {
    let config = BenchmarkConfig::default();
    let raw = RawTriggered {
        requests: num("250"),
        unit: Some(TimeUnit::PerSecond),
        peak_load_pct: num("140"),
        complexity: Some(ComplexityTier::Complex),
        ..RawTriggered::default()
    };
    let CalculationResult::Triggered(r) = calculate(&config, &WorkloadInput::Triggered(raw.resolve())) else {
        panic!("expected triggered result");
    };

    let ha = r.nodes.ha.finite().expect("bounded") as f64;
    let prediction = predict(&config, PredictionTarget::Triggered, ha);
    let complex = prediction
        .rows
        .iter()
        .find(|row| row.tier == Some(ComplexityTier::Complex))
        .expect("complex row");
    assert!(complex.throughput >= r.peak_requests_per_second);
}

// ── Benchmark overrides ─────────────────────────────────────────────

#[test]
fn overridden_ha_policy_flows_into_every_model() {
    let config = BenchmarkConfig::from_toml_str("[ha]\nbuffer_multiplier = 2.0\nmin_nodes = 3\n").unwrap();
    let raw = RawScheduled {
        batch_size: num("300"),
        ..RawScheduled::default()
    };
    let result = calculate(&config, &WorkloadInput::Scheduled(raw.resolve()));
    // ceil(max(2.1333 * 2.0, 3)) = 5
    assert_eq!(result.execution_nodes().ha, NodeCount::Finite(5));
}
