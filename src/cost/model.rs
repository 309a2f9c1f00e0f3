// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch cost model for CNC machined parts

use super::ShopRates;
use crate::geometry::GeometryReport;
use crate::material::Material;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Extra machining time at maximum complexity, as a fraction
const COMPLEXITY_TIME_PENALTY: f64 = 0.5;

/// Per-unit share of batch-level costs, in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub labor_per_unit: f64,
    pub setup_per_unit: f64,
    pub machine_per_unit: f64,
}

/// Unit cost estimate for one part in one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReport {
    pub material_cost_usd: f64,
    pub machining_time_minutes: f64,
    pub total_cost_usd: f64,
    pub mass_kg: f64,
    /// Removal time before complexity and material adjustment
    pub stock_removal_minutes: f64,
    pub breakdown: CostBreakdown,
    pub batch_size: u32,
}

/// Estimate unit cost from geometry, material, and shop rates
///
/// Stock is the part's bounding box; the machining time covers removing
/// everything outside the part at the configured removal rate. `rates`
/// must have passed [`ShopRates::validate`].
pub fn estimate(report: &GeometryReport, material: &Material, rates: &ShopRates) -> CostReport {
    let mass_kg = report.volume_cm3 * material.density_g_per_cm3 / 1000.0;
    let material_cost_usd = mass_kg * material.price_per_kg;

    let stock_volume = report.bounding_box.volume_cm3();
    let removed_volume = (stock_volume - report.volume_cm3).max(0.0);
    let stock_removal_minutes = removed_volume / rates.material_removal_rate_cm3_per_min;

    let complexity_multiplier = 1.0 + (report.complexity_score / 10.0) * COMPLEXITY_TIME_PENALTY;
    let material_multiplier = 1.0 / material.machinability;
    let machining_time_minutes = stock_removal_minutes * complexity_multiplier * material_multiplier;

    let batch = rates.batch_size as f64;
    let hours = machining_time_minutes / 60.0;
    let breakdown = CostBreakdown {
        labor_per_unit: hours * rates.labor_rate_per_hour / batch,
        setup_per_unit: rates.setup_cost / batch,
        machine_per_unit: hours * rates.machine_rate_per_hour / batch,
    };

    let total_cost_usd = material_cost_usd
        + breakdown.labor_per_unit
        + breakdown.setup_per_unit
        + breakdown.machine_per_unit;

    debug!(
        material = material.key,
        material_cost = material_cost_usd,
        minutes = machining_time_minutes,
        total = total_cost_usd,
        "estimated cost"
    );

    CostReport {
        material_cost_usd,
        machining_time_minutes,
        total_cost_usd,
        mass_kg,
        stock_removal_minutes,
        breakdown,
        batch_size: rates.batch_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extents;
    use crate::material::MaterialCatalog;
    use approx::assert_relative_eq;

    fn report(volume_cm3: f64, extents: Extents, complexity_score: f64) -> GeometryReport {
        GeometryReport {
            volume_cm3,
            surface_area_cm2: 6.0,
            bounding_box: extents,
            triangle_count: 12,
            complexity_score,
            surface_to_volume_ratio: 6.0,
            aspect_ratio: extents.aspect_ratio(),
        }
    }

    #[test]
    fn test_hollowed_block() {
        // 10 cm³ part in a 20 cm³ stock: 10 cm³ removed at 50 cm³/min
        let geometry = report(10.0, Extents::new(20.0, 10.0, 100.0), 0.0);
        let aluminum = MaterialCatalog::lookup("aluminum_6061").unwrap();
        let cost = estimate(&geometry, aluminum, &ShopRates::default());

        assert_relative_eq!(cost.mass_kg, 0.027, max_relative = 1e-12);
        assert_relative_eq!(cost.material_cost_usd, 0.1215, max_relative = 1e-12);
        assert_relative_eq!(cost.stock_removal_minutes, 0.2, max_relative = 1e-12);
        assert_relative_eq!(cost.machining_time_minutes, 0.25, max_relative = 1e-12);
        assert_relative_eq!(cost.breakdown.labor_per_unit, 0.0025, max_relative = 1e-12);
        assert_relative_eq!(cost.breakdown.machine_per_unit, 0.25 / 60.0 * 0.8, max_relative = 1e-12);
        assert_relative_eq!(cost.breakdown.setup_per_unit, 1.5);
    }

    #[test]
    fn test_complexity_scales_time() {
        let steel = MaterialCatalog::lookup("steel_mild").unwrap();
        let simple = estimate(&report(1.0, Extents::new(20.0, 10.0, 10.0), 0.0), steel, &ShopRates::default());
        let complex = estimate(&report(1.0, Extents::new(20.0, 10.0, 10.0), 10.0), steel, &ShopRates::default());

        assert_relative_eq!(
            complex.machining_time_minutes,
            simple.machining_time_minutes * 1.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_removal_never_negative() {
        // Volume above the box volume only happens with broken meshes.
        let geometry = report(5.0, Extents::new(10.0, 10.0, 10.0), 3.0);
        let nylon = MaterialCatalog::lookup("nylon").unwrap();
        let cost = estimate(&geometry, nylon, &ShopRates::default());

        assert_eq!(cost.stock_removal_minutes, 0.0);
        assert_eq!(cost.machining_time_minutes, 0.0);
    }

    #[test]
    fn test_batch_size_amortizes_setup() {
        let geometry = report(1.0, Extents::new(10.0, 10.0, 10.0), 0.0);
        let abs = MaterialCatalog::lookup("abs_plastic").unwrap();
        let single = estimate(&geometry, abs, &ShopRates::default().with_batch_size(1));

        assert_eq!(single.breakdown.setup_per_unit, 150.0);
        assert_eq!(single.batch_size, 1);
    }
}
