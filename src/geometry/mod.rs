// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and analysis

mod analytics;
mod bbox;
mod mesh;
mod primitives;

pub use analytics::{
    analyze, calculate_surface_area, calculate_volume, complexity_score,
    surface_to_volume_ratio, GeometryReport, MAX_COMPLEXITY,
};
pub use bbox::{BoundingBox, Extents};
pub use mesh::{Mesh, Triangle};
pub use primitives::Primitive;
