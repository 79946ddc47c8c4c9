//! Property-based tests for the rate converter, HA policy, and calculators.

use proptest::prelude::*;
use sizer_core::models::scheduled::{self, BatchUnit, ScheduledInput};
use sizer_core::models::triggered::{self, TriggeredInput};
use sizer_core::units::{average_per_second, rescale};
use sizer_core::{BenchmarkConfig, ComplexityTier, HaPolicy, NodeCount, TimeUnit};

fn time_unit() -> impl Strategy<Value = TimeUnit> {
    prop::sample::select(TimeUnit::ALL.to_vec())
}

fn tier() -> impl Strategy<Value = ComplexityTier> {
    prop::sample::select(ComplexityTier::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_average_rate_is_never_negative_or_nan(
        value in prop::num::f64::ANY,
        unit in time_unit(),
        days in -10.0f64..40.0,
        hours in -10.0f64..30.0,
    ) {
        let rate = average_per_second(value, unit, days, hours);
        prop_assert!(rate >= 0.0, "rate {rate} for {value} {unit}");
    }

    #[test]
    fn prop_average_rate_is_monotonic_in_volume(
        a in 0.0f64..1e12,
        b in 0.0f64..1e12,
        unit in time_unit(),
        days in 1.0f64..31.0,
        hours in 1.0f64..24.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            average_per_second(lo, unit, days, hours) <= average_per_second(hi, unit, days, hours)
        );
    }

    #[test]
    fn prop_rescale_round_trips(
        value in 0.0f64..1e9,
        from in time_unit(),
        to in time_unit(),
    ) {
        let back = rescale(rescale(value, from, to), to, from);
        prop_assert!((back - value).abs() <= 1e-6 * value.max(1.0));
    }

    #[test]
    fn prop_ha_never_below_non_ha_or_floor(raw in 0.0f64..1e6) {
        let plan = HaPolicy::default().apply(raw);
        let non_ha = plan.non_ha.finite().unwrap();
        let ha = plan.ha.finite().unwrap();
        prop_assert!(ha >= non_ha);
        prop_assert!(ha >= 2);
        prop_assert!(non_ha as f64 >= raw);
    }

    #[test]
    fn prop_triggered_capacity_covers_peak(
        requests in 0.0f64..1e10,
        unit in time_unit(),
        peak in 100.0f64..300.0,
        complexity in tier(),
    ) {
        let input = TriggeredInput {
            requests,
            unit,
            peak_load_pct: peak,
            complexity,
            ..TriggeredInput::default()
        };
        let r = triggered::calculate(&BenchmarkConfig::default(), &input);
        prop_assert!(r.nodes.ha != NodeCount::Unbounded);

        let capacity = r.capacity.unwrap();
        prop_assert!(capacity.max_capacity >= r.peak_requests_per_second);
        prop_assert!(capacity.headroom_vs_peak_pct >= 0.0);
        prop_assert!(capacity.headroom_vs_average_pct >= capacity.headroom_vs_peak_pct);
    }

    #[test]
    fn prop_scheduled_capacity_is_never_short(
        batch_size in 0.0f64..f64::MAX,
        window in 1.0f64..48.0,
        multiplier in 1.0f64..3.0,
    ) {
        let input = ScheduledInput {
            batch_size,
            batch_unit: BatchUnit::Gb,
            process_window_hours: window,
            complexity_multiplier: multiplier,
        };
        let r = scheduled::calculate(&BenchmarkConfig::default(), &input);
        match r.capacity {
            Some(capacity) => {
                prop_assert!(!r.nodes.is_unbounded());
                prop_assert!(capacity.max_capacity >= r.mb_per_minute);
                prop_assert!(capacity.headroom_pct >= 0.0);
            }
            None => prop_assert!(r.nodes.is_unbounded()),
        }
    }
}
