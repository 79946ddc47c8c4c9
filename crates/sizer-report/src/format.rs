//! Number formatting shared by both renderers.

pub(crate) const UNBOUNDED: &str = "unbounded";
pub(crate) const NOT_APPLICABLE: &str = "n/a";

/// Fixed-point with `decimals` places; infinite values render as `unbounded`.
pub(crate) fn fixed(value: f64, decimals: usize) -> String {
    if value.is_infinite() {
        UNBOUNDED.to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// Headroom as a signed one-decimal percentage, e.g. `+40.6%`.
pub(crate) fn signed_pct(value: f64) -> String {
    format!("{value:+.1}%")
}

/// Headroom without a sign, e.g. `40.6%`.
pub(crate) fn pct(value: f64) -> String {
    format!("{value:.1}%")
}

/// Render a capacity figure, or `n/a` when there is none.
pub(crate) fn capacity_or_na<C>(capacity: Option<&C>, render: impl Fn(&C) -> String) -> String {
    capacity.map_or_else(|| NOT_APPLICABLE.to_string(), render)
}
