//! Complexity tiers and per-tier benchmark tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SizerError;

/// Categorical task complexity. Selects an assumed response time or a
/// throughput multiplier from a [`TierValues`] table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplexityTier {
    Simple,
    #[default]
    Moderate,
    Complex,
    VeryComplex,
}

impl ComplexityTier {
    /// Tiers in ascending order of cost.
    pub const ALL: [ComplexityTier; 4] = [
        ComplexityTier::Simple,
        ComplexityTier::Moderate,
        ComplexityTier::Complex,
        ComplexityTier::VeryComplex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityTier::Simple => "simple",
            ComplexityTier::Moderate => "moderate",
            ComplexityTier::Complex => "complex",
            ComplexityTier::VeryComplex => "veryComplex",
        }
    }

    /// Capitalized label used in tables.
    pub fn label(&self) -> &'static str {
        match self {
            ComplexityTier::Simple => "Simple",
            ComplexityTier::Moderate => "Moderate",
            ComplexityTier::Complex => "Complex",
            ComplexityTier::VeryComplex => "VeryComplex",
        }
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplexityTier {
    type Err = SizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "simple" => Ok(ComplexityTier::Simple),
            "moderate" => Ok(ComplexityTier::Moderate),
            "complex" => Ok(ComplexityTier::Complex),
            "verycomplex" => Ok(ComplexityTier::VeryComplex),
            _ => Err(SizerError::UnknownComplexity(s.to_string())),
        }
    }
}

/// One value per complexity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierValues {
    pub simple: f64,
    pub moderate: f64,
    pub complex: f64,
    pub very_complex: f64,
}

impl TierValues {
    pub const fn new(simple: f64, moderate: f64, complex: f64, very_complex: f64) -> Self {
        Self {
            simple,
            moderate,
            complex,
            very_complex,
        }
    }

    pub fn get(&self, tier: ComplexityTier) -> f64 {
        match tier {
            ComplexityTier::Simple => self.simple,
            ComplexityTier::Moderate => self.moderate,
            ComplexityTier::Complex => self.complex,
            ComplexityTier::VeryComplex => self.very_complex,
        }
    }

    /// `(tier, value)` pairs in tier order.
    pub fn iter(&self) -> impl Iterator<Item = (ComplexityTier, f64)> + '_ {
        ComplexityTier::ALL.into_iter().map(|tier| (tier, self.get(tier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tier_is_moderate() {
        assert_eq!(ComplexityTier::default(), ComplexityTier::Moderate);
    }

    #[test]
    fn parse_tier_spellings() {
        assert_eq!("veryComplex".parse::<ComplexityTier>().unwrap(), ComplexityTier::VeryComplex);
        assert_eq!("very-complex".parse::<ComplexityTier>().unwrap(), ComplexityTier::VeryComplex);
        assert_eq!("SIMPLE".parse::<ComplexityTier>().unwrap(), ComplexityTier::Simple);
        assert!("trivial".parse::<ComplexityTier>().is_err());
    }

    #[test]
    fn tier_values_iterate_in_order() {
        let table = TierValues::new(1.0, 2.0, 3.0, 4.0);
        let tiers: Vec<_> = table.iter().collect();
        assert_eq!(tiers.len(), 4);
        assert_eq!(tiers[0], (ComplexityTier::Simple, 1.0));
        assert_eq!(tiers[3], (ComplexityTier::VeryComplex, 4.0));
    }

    #[test]
    fn serde_name_is_camel_case() {
        let json = serde_json::to_string(&ComplexityTier::VeryComplex).unwrap();
        assert_eq!(json, "\"veryComplex\"");
    }
}
