//! Human-readable result formatting.

use sizer_core::models::{
    DataVolumeResult, EventFrequencyResult, RateCapacity, ScheduledResult, TriggeredResult, UltraResult,
};
use sizer_core::predict::{Factor, Prediction, PredictionTarget};
use sizer_core::workload::FleetPlan;
use sizer_core::{CalculationResult, NodePlan};

use crate::format::{NOT_APPLICABLE, capacity_or_na, fixed, signed_pct};

const BOX_WIDTH: usize = 42;

/// Summary card for one sizing result, optionally labelled with a workload name.
pub fn format_result(name: Option<&str>, result: &CalculationResult) -> String {
    let mut out = String::new();

    push_header(&mut out, title(result), name);

    match result {
        CalculationResult::Triggered(r) => triggered(&mut out, r),
        CalculationResult::Ultra(r) => ultra(&mut out, r),
        CalculationResult::Scheduled(r) => scheduled(&mut out, r),
        CalculationResult::HeadlessEventFrequency(r) => event_frequency(&mut out, r),
        CalculationResult::HeadlessDataVolume(r) => data_volume(&mut out, r),
    }

    out
}

/// Throughput table for a prediction.
pub fn format_prediction(prediction: &Prediction) -> String {
    let mut out = String::new();
    let unit = prediction.throughput_unit.label();
    let with_rows = prediction.target == PredictionTarget::Scheduled;

    push_header(&mut out, "Throughput Prediction", Some(prediction.target.label()));
    out.push_str(&format!("Nodes: {}\n\n", fixed(prediction.node_count, 0)));

    let factor_heading = match prediction.rows.first().map(|r| r.factor) {
        Some(Factor::Multiplier(_)) => "Multiplier",
        _ => "Response",
    };
    out.push_str(&format!("  {:<12} {:>10}  {:>20}", "Tier", factor_heading, "Throughput"));
    if with_rows {
        out.push_str(&format!("  {:>18}", "Rows/min"));
    }
    out.push('\n');

    for row in &prediction.rows {
        let tier = row.tier.map_or("Fixed", |t| t.label());
        let factor = match row.factor {
            Factor::ResponseTimeSecs(secs) => format!("{secs} s"),
            Factor::Multiplier(m) => format!("x{m}"),
        };
        let throughput = format!("{} {unit}", fixed(row.throughput, 2));
        out.push_str(&format!("  {tier:<12} {factor:>10}  {throughput:>20}"));
        if with_rows {
            let rows = row.rows_per_minute.map_or_else(|| NOT_APPLICABLE.to_string(), |r| fixed(r, 0));
            out.push_str(&format!("  {rows:>18}"));
        }
        out.push('\n');
    }

    out
}

/// One line per workload plus the fleet total.
pub fn format_plan(plan: &FleetPlan) -> String {
    let mut out = String::new();

    push_header(&mut out, "Fleet Plan", None);

    if plan.entries.is_empty() {
        out.push_str("No workloads defined.\n");
        return out;
    }

    out.push_str(&format!("  {:<24} {:<28} {:>9} {:>9}\n", "Workload", "Model", "Non-HA", "HA"));
    for entry in &plan.entries {
        out.push_str(&format!(
            "  {:<24} {:<28} {:>9} {:>9}\n",
            entry.name,
            title(&entry.result),
            entry.result.total_non_ha().to_string(),
            entry.result.total_ha().to_string(),
        ));
    }
    out.push_str(&format!(
        "\n  {:<53} {:>9} {:>9}\n",
        "Total",
        plan.total_non_ha.to_string(),
        plan.total_ha.to_string(),
    ));

    out
}

fn title(result: &CalculationResult) -> &'static str {
    match result {
        CalculationResult::Triggered(_) => "Triggered Task",
        CalculationResult::Ultra(_) => "Ultra Task",
        CalculationResult::Scheduled(_) => "Scheduled Task",
        CalculationResult::HeadlessEventFrequency(_) => "Headless (Event Frequency)",
        CalculationResult::HeadlessDataVolume(_) => "Headless (Data Volume)",
    }
}

fn push_header(out: &mut String, title: &str, subtitle: Option<&str>) {
    let rule = "═".repeat(BOX_WIDTH);
    let inner = BOX_WIDTH - 2;
    out.push_str(&format!("\n╔{rule}╗\n"));
    out.push_str(&format!("║  {title:<inner$}║\n"));
    if let Some(subtitle) = subtitle {
        let subtitle = clip(subtitle, inner);
        out.push_str(&format!("╠{rule}╣\n"));
        out.push_str(&format!("║  {subtitle:<inner$}║\n"));
    }
    out.push_str(&format!("╚{rule}╝\n\n"));
}

/// Cut `text` to `width` characters, marking the cut with `…`.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn line(out: &mut String, label: &str, value: impl AsRef<str>) {
    out.push_str(&format!("  {label:<24} {}\n", value.as_ref()));
}

fn nodes(out: &mut String, role: &str, plan: &NodePlan) {
    line(out, &format!("{role} (raw)"), fixed(plan.raw, 2));
    line(out, &format!("{role} (non-HA)"), plan.non_ha.to_string());
    line(out, &format!("{role} (HA)"), plan.ha.to_string());
}

fn rate_capacity(out: &mut String, capacity: Option<&RateCapacity>, unit: &str) {
    line(
        out,
        "Max capacity (HA)",
        capacity_or_na(capacity, |c| format!("{} {unit}", fixed(c.max_capacity, 2))),
    );
    line(out, "Headroom vs. peak", capacity_or_na(capacity, |c| signed_pct(c.headroom_vs_peak_pct)));
    line(
        out,
        "Headroom vs. average",
        capacity_or_na(capacity, |c| signed_pct(c.headroom_vs_average_pct)),
    );
}

fn triggered(out: &mut String, r: &TriggeredResult) {
    let i = &r.input;
    line(out, "Requests", format!("{} {}", i.requests, i.unit));
    line(out, "Coverage", format!("{} days x {} h", i.coverage_days, i.coverage_hours));
    line(out, "Peak load", format!("{}%", i.peak_load_pct));
    line(out, "Complexity", i.complexity.label());
    line(out, "Assumed response time", format!("{} s", r.response_time));
    out.push('\n');
    line(out, "Avg. requests", format!("{} / sec", fixed(r.avg_requests_per_second, 2)));
    line(out, "Peak requests", format!("{} / sec", fixed(r.peak_requests_per_second, 2)));
    line(out, "Throughput / node", format!("{} / sec", fixed(r.node_throughput, 2)));
    out.push('\n');
    nodes(out, "Nodes", &r.nodes);
    out.push('\n');
    rate_capacity(out, r.capacity.as_ref(), "/ sec");
}

fn ultra(out: &mut String, r: &UltraResult) {
    let i = &r.input;
    line(out, "Requests", format!("{} {}", i.requests, i.unit));
    line(out, "Coverage", format!("{} days x {} h", i.coverage_days, i.coverage_hours));
    line(out, "Peak load", format!("{}%", i.peak_load_pct));
    line(out, "Complexity", i.complexity.label());
    line(out, "Assumed response time", format!("{} s", r.response_time));
    out.push('\n');
    line(out, "Avg. requests", format!("{} / sec", fixed(r.avg_requests_per_second, 2)));
    line(out, "Peak requests", format!("{} / sec", fixed(r.peak_requests_per_second, 2)));
    line(out, "Throughput / exec node", format!("{} / sec", fixed(r.exec_node_throughput, 2)));
    out.push('\n');
    nodes(out, "Execution", &r.exec_nodes);
    nodes(out, "FeedMaster", &r.feed_master_nodes);
    out.push('\n');
    rate_capacity(out, r.capacity.as_ref(), "/ sec");
}

fn scheduled(out: &mut String, r: &ScheduledResult) {
    let i = &r.input;
    line(out, "Batch size", format!("{} {}", i.batch_size, i.batch_unit));
    line(out, "Process window", format!("{} h", i.process_window_hours));
    line(out, "Complexity multiplier", format!("x{}", i.complexity_multiplier));
    out.push('\n');
    line(out, "Batch volume", format!("{} GB", fixed(r.batch_gb, 2)));
    line(out, "Required throughput", format!("{} MB/min", fixed(r.mb_per_minute, 2)));
    out.push('\n');
    nodes(out, "Nodes", &r.nodes);
    out.push('\n');
    let capacity = r.capacity.as_ref();
    line(
        out,
        "Max capacity (HA)",
        capacity_or_na(capacity, |c| format!("{} MB/min", fixed(c.max_capacity, 2))),
    );
    line(out, "Headroom", capacity_or_na(capacity, |c| signed_pct(c.headroom_pct)));
}

fn event_frequency(out: &mut String, r: &EventFrequencyResult) {
    let i = &r.input;
    line(out, "Events", format!("{} {}", i.events, i.unit));
    line(out, "Coverage", format!("{} h", i.coverage_hours));
    line(out, "Peak load", format!("{}%", i.peak_load_pct));
    out.push('\n');
    line(out, "Avg. events", format!("{} / sec", fixed(r.avg_events_per_second, 2)));
    line(out, "Peak events", format!("{} / sec", fixed(r.peak_events_per_second, 2)));
    line(out, "Throughput / node", format!("{} / sec", fixed(r.node_throughput, 2)));
    out.push('\n');
    nodes(out, "Nodes", &r.nodes);
    out.push('\n');
    rate_capacity(out, r.capacity.as_ref(), "events/sec");
}

fn data_volume(out: &mut String, r: &DataVolumeResult) {
    let i = &r.input;
    line(out, "Events / day", format!("{}", i.events_per_day));
    line(out, "Message size", format!("{} bytes", i.message_size_bytes));
    line(out, "Coverage", format!("{} h", i.coverage_hours));
    line(out, "Peak load", format!("{}%", i.peak_load_pct));
    line(out, "Complexity multiplier", format!("x{}", i.complexity_multiplier));
    out.push('\n');
    line(out, "Daily volume", format!("{} GB eq.", fixed(r.batch_gb_eq, 2)));
    line(out, "Avg. throughput", format!("{} MB/min", fixed(r.avg_mb_per_minute, 2)));
    line(out, "Peak throughput", format!("{} MB/min", fixed(r.peak_mb_per_minute, 2)));
    out.push('\n');
    nodes(out, "Nodes", &r.nodes);
    out.push('\n');
    rate_capacity(out, r.capacity.as_ref(), "MB/min");
}
