// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Design-for-manufacturing advisor
//!
//! Every rule in [`DfmRule::ALL`] is evaluated on every call, in table
//! order. Rules are independent; each contributes at most one suggestion.

mod rules;
mod suggestion;

pub use rules::{
    DfmRule, RuleContext, ASPECT_RATIO_THRESHOLD, COMPLEXITY_THRESHOLD,
    MACHINABILITY_THRESHOLD, SURFACE_RATIO_THRESHOLD, TRIANGLE_COUNT_THRESHOLD,
};
pub use suggestion::{Impact, Savings, Suggestion};

use crate::geometry::GeometryReport;
use crate::material::Material;

/// Generate suggestions for a part in a material at a given unit cost
pub fn suggest(report: &GeometryReport, material: &Material, total_cost: f64) -> Vec<Suggestion> {
    let ctx = RuleContext {
        report,
        material,
        total_cost,
    };

    DfmRule::ALL
        .iter()
        .filter_map(|rule| rule.evaluate(&ctx))
        .collect()
}
