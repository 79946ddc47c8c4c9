//! High-availability node policy.
//!
//! ```text
//! non_ha = ceil(raw)
//! ha     = ceil(max(raw * buffer_multiplier, min_nodes))
//! ```
//!
//! A raw requirement of `+inf` (zero per-node throughput, or a load that
//! overflows) is carried through as [`NodeCount::Unbounded`] rather than
//! clamped to some large integer.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A rounded node count, or the unbounded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeCount {
    Finite(u64),
    Unbounded,
}

impl NodeCount {
    /// Round a non-negative raw count up. NaN and negatives count as zero;
    /// anything a `u64` cannot hold is unbounded.
    pub fn ceil(raw: f64) -> Self {
        if raw.is_nan() || raw <= 0.0 {
            NodeCount::Finite(0)
        } else if raw.ceil() >= u64::MAX as f64 {
            NodeCount::Unbounded
        } else {
            NodeCount::Finite(raw.ceil() as u64)
        }
    }

    pub fn finite(&self) -> Option<u64> {
        match self {
            NodeCount::Finite(n) => Some(*n),
            NodeCount::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, NodeCount::Unbounded)
    }
}

impl std::ops::Add for NodeCount {
    type Output = NodeCount;

    fn add(self, rhs: NodeCount) -> NodeCount {
        match (self, rhs) {
            (NodeCount::Finite(a), NodeCount::Finite(b)) => NodeCount::Finite(a.saturating_add(b)),
            _ => NodeCount::Unbounded,
        }
    }
}

impl std::iter::Sum for NodeCount {
    fn sum<I: Iterator<Item = NodeCount>>(iter: I) -> NodeCount {
        iter.fold(NodeCount::Finite(0), |acc, n| acc + n)
    }
}

impl fmt::Display for NodeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeCount::Finite(n) => write!(f, "{n}"),
            NodeCount::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl Serialize for NodeCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeCount::Finite(n) => serializer.serialize_u64(*n),
            NodeCount::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

/// Raw requirement plus both rounded counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePlan {
    /// Fractional, pre-policy requirement. `+inf` when unbounded.
    pub raw: f64,
    pub non_ha: NodeCount,
    pub ha: NodeCount,
}

impl NodePlan {
    pub fn is_unbounded(&self) -> bool {
        self.ha.is_unbounded()
    }
}

/// Redundancy buffer and minimum floor applied to every raw requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaPolicy {
    pub buffer_multiplier: f64,
    pub min_nodes: u32,
}

impl Default for HaPolicy {
    fn default() -> Self {
        Self {
            buffer_multiplier: 1.3,
            min_nodes: 2,
        }
    }
}

impl HaPolicy {
    pub fn non_ha(&self, raw: f64) -> NodeCount {
        NodeCount::ceil(raw)
    }

    pub fn ha(&self, raw: f64) -> NodeCount {
        let raw = sanitize(raw);
        NodeCount::ceil((raw * self.buffer_multiplier).max(f64::from(self.min_nodes)))
    }

    /// Apply the policy to a raw requirement.
    pub fn apply(&self, raw: f64) -> NodePlan {
        let raw = sanitize(raw);
        NodePlan {
            raw,
            non_ha: self.non_ha(raw),
            ha: self.ha(raw),
        }
    }
}

/// Negative and NaN requirements are treated as zero.
fn sanitize(raw: f64) -> f64 {
    if raw.is_nan() || raw < 0.0 { 0.0 } else { raw }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_raw_hits_min_floor() {
        let plan = HaPolicy::default().apply(0.0);
        assert_eq!(plan.non_ha, NodeCount::Finite(0));
        assert_eq!(plan.ha, NodeCount::Finite(2));
    }

    #[test]
    fn small_raw_rounds_up() {
        let plan = HaPolicy::default().apply(0.00603);
        assert_eq!(plan.non_ha, NodeCount::Finite(1));
        assert_eq!(plan.ha, NodeCount::Finite(2));
    }

    #[test]
    fn buffer_applies_above_floor() {
        let plan = HaPolicy::default().apply(4.0);
        assert_eq!(plan.non_ha, NodeCount::Finite(4));
        // 4 * 1.3 = 5.2
        assert_eq!(plan.ha, NodeCount::Finite(6));
    }

    #[test]
    fn infinite_raw_is_unbounded() {
        let plan = HaPolicy::default().apply(f64::INFINITY);
        assert_eq!(plan.non_ha, NodeCount::Unbounded);
        assert_eq!(plan.ha, NodeCount::Unbounded);
        assert!(plan.is_unbounded());
    }

    #[test]
    fn counts_past_u64_are_unbounded() {
        let plan = HaPolicy::default().apply(1e300);
        assert_eq!(plan.non_ha, NodeCount::Unbounded);
        assert_eq!(plan.ha, NodeCount::Unbounded);
        assert_eq!(NodeCount::ceil(1e18), NodeCount::Finite(1_000_000_000_000_000_000));
    }

    #[test]
    fn negative_and_nan_are_guarded() {
        let policy = HaPolicy::default();
        for raw in [-3.0, f64::NAN, f64::NEG_INFINITY] {
            let plan = policy.apply(raw);
            assert_eq!(plan.raw, 0.0);
            assert_eq!(plan.non_ha, NodeCount::Finite(0));
            assert_eq!(plan.ha, NodeCount::Finite(2));
        }
    }

    #[test]
    fn unbounded_orders_above_finite() {
        assert!(NodeCount::Unbounded > NodeCount::Finite(u64::MAX));
    }

    #[test]
    fn sum_is_absorbed_by_unbounded() {
        let finite: NodeCount = [NodeCount::Finite(2), NodeCount::Finite(3)].into_iter().sum();
        assert_eq!(finite, NodeCount::Finite(5));

        let mixed: NodeCount = [NodeCount::Finite(2), NodeCount::Unbounded].into_iter().sum();
        assert_eq!(mixed, NodeCount::Unbounded);
    }

    #[test]
    fn node_count_serializes_distinctly() {
        assert_eq!(serde_json::to_string(&NodeCount::Finite(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&NodeCount::Unbounded).unwrap(),
            "\"unbounded\""
        );
        assert_eq!(NodeCount::Unbounded.to_string(), "unbounded");
    }
}
