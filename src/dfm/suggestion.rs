// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative effect of acting on a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected benefit of a suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Savings {
    /// Per-unit USD range derived from the current total cost
    #[serde(rename_all = "camelCase")]
    Range {
        low_usd: f64,
        high_usd: f64,
        low_pct: f64,
        high_pct: f64,
    },
    /// Benefit that is not a direct cost reduction
    Note { text: String },
}

impl Savings {
    /// Range of `total_cost` between two fractions
    pub fn range(total_cost: f64, low_pct: f64, high_pct: f64) -> Self {
        Self::Range {
            low_usd: total_cost * low_pct,
            high_usd: total_cost * high_pct,
            low_pct,
            high_pct,
        }
    }

    pub fn note(text: impl Into<String>) -> Self {
        Self::Note { text: text.into() }
    }
}

impl fmt::Display for Savings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range {
                low_usd, high_usd, ..
            } => write!(f, "${:.2} - ${:.2} per unit", low_usd, high_usd),
            Self::Note { text } => f.write_str(text),
        }
    }
}

/// One design-for-manufacturing recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub savings_estimate: Savings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_savings_display() {
        assert_eq!(
            Savings::range(10.0, 0.15, 0.25).to_string(),
            "$1.50 - $2.50 per unit"
        );
        assert_eq!(Savings::note("Faster CAM").to_string(), "Faster CAM");
    }

    #[test]
    fn test_savings_serialization() {
        let json = serde_json::to_value(Savings::range(2.0, 0.1, 0.2)).unwrap();
        assert_eq!(json["kind"], "range");
        assert_eq!(json["lowUsd"], 0.2);
        assert_eq!(json["highPct"], 0.2);
        assert_eq!(serde_json::to_value(Impact::High).unwrap(), "high");
    }
}
