// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics for manufacturability estimation
//!
//! Input coordinates are taken to be millimeters. STL carries no unit
//! information, so no scale is inferred from the file. Volume is reported
//! in cm³, surface area in cm², and bounding extents stay in mm.

use super::{Extents, Mesh};
use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weight of the normalized surface-to-volume term in the complexity score
pub const SURFACE_RATIO_WEIGHT: f64 = 0.4;
/// Divisor normalizing the surface-to-volume ratio
pub const SURFACE_RATIO_SCALE: f64 = 6.0;
/// Weight of the triangle-count term
pub const TRIANGLE_WEIGHT: f64 = 0.3;
/// Triangle count at which the triangle term saturates
pub const TRIANGLE_SATURATION: f64 = 10_000.0;
/// Weight of the aspect-ratio term
pub const ASPECT_WEIGHT: f64 = 0.3;
/// Divisor normalizing the aspect ratio
pub const ASPECT_SCALE: f64 = 10.0;
/// Upper bound of the complexity score
pub const MAX_COMPLEXITY: f64 = 10.0;

const MM3_PER_CM3: f64 = 1000.0;
const MM2_PER_CM2: f64 = 100.0;

/// Geometric quantities derived from one mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryReport {
    /// Enclosed volume in cm³
    pub volume_cm3: f64,
    /// Total surface area in cm²
    pub surface_area_cm2: f64,
    /// Bounding box edge lengths in mm
    pub bounding_box: Extents,
    pub triangle_count: usize,
    /// Heuristic machining difficulty in [0, 10]
    pub complexity_score: f64,
    /// Surface area over volume^(2/3), dimensionless
    pub surface_to_volume_ratio: f64,
    /// Longest over shortest bounding box axis
    pub aspect_ratio: f64,
}

/// Analyze mesh geometry
///
/// Fails when the mesh has no triangles or encloses no volume, since the
/// surface-to-volume term is undefined there.
pub fn analyze(mesh: &Mesh) -> Result<GeometryReport, AnalysisError> {
    let triangle_count = mesh.triangle_count();
    if triangle_count == 0 {
        return Err(AnalysisError::degenerate("mesh has no triangles"));
    }

    let volume_cm3 = calculate_volume(mesh) / MM3_PER_CM3;
    if volume_cm3 == 0.0 || !volume_cm3.is_finite() {
        return Err(AnalysisError::degenerate("mesh encloses zero volume"));
    }

    let surface_area_cm2 = calculate_surface_area(mesh) / MM2_PER_CM2;
    let bounding_box = mesh.bounding_box().size();

    let surface_to_volume_ratio = surface_to_volume_ratio(surface_area_cm2, volume_cm3);
    let aspect_ratio = bounding_box.aspect_ratio();
    let complexity_score =
        complexity_score(surface_to_volume_ratio, triangle_count, aspect_ratio);

    let report = GeometryReport {
        volume_cm3,
        surface_area_cm2,
        bounding_box,
        triangle_count,
        complexity_score,
        surface_to_volume_ratio,
        aspect_ratio,
    };

    debug!(
        volume_cm3 = report.volume_cm3,
        surface_area_cm2 = report.surface_area_cm2,
        triangles = report.triangle_count,
        complexity = report.complexity_score,
        "analyzed mesh"
    );

    Ok(report)
}

/// Calculate mesh volume in mm³ using signed volume of triangles
///
/// Exact for a closed, consistently oriented mesh. The absolute value hides
/// a globally inverted winding but does not repair mixed orientation.
pub fn calculate_volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| triangle.signed_volume())
        .sum::<f64>()
        .abs()
}

/// Calculate total surface area in mm²
pub fn calculate_surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles.iter().map(|triangle| triangle.area()).sum()
}

/// Surface area normalized by volume^(2/3)
pub fn surface_to_volume_ratio(surface_area_cm2: f64, volume_cm3: f64) -> f64 {
    surface_area_cm2 / volume_cm3.powf(2.0 / 3.0)
}

/// Weighted complexity heuristic, clamped to [0, 10]
pub fn complexity_score(surface_to_volume_ratio: f64, triangle_count: usize, aspect_ratio: f64) -> f64 {
    let surface_term = surface_to_volume_ratio / SURFACE_RATIO_SCALE * SURFACE_RATIO_WEIGHT;
    let triangle_term = (triangle_count as f64 / TRIANGLE_SATURATION).min(1.0) * TRIANGLE_WEIGHT;
    let aspect_term = aspect_ratio / ASPECT_SCALE * ASPECT_WEIGHT;

    let score = (surface_term + triangle_term + aspect_term) * 10.0;
    if score.is_nan() {
        // Only reachable through a flat bounding box, which is saturated complexity.
        return MAX_COMPLEXITY;
    }
    score.clamp(0.0, MAX_COMPLEXITY)
}
