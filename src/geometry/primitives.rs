// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reference solids with outward-facing winding
//!
//! Used as fixtures for tests and benchmarks and as calibration parts for
//! the estimator.

use super::{Mesh, Triangle};
use nalgebra::Point3;
use std::f64::consts::PI;

/// Geometric primitives, placed with their minimum corner (or base) at the origin
pub enum Primitive {
    Block { x: f64, y: f64, z: f64 },
    Cylinder { h: f64, r: f64, segments: u32 },
}

impl Primitive {
    pub fn block(x: f64, y: f64, z: f64) -> Self {
        Self::Block { x, y, z }
    }

    pub fn cube(size: f64) -> Self {
        Self::block(size, size, size)
    }

    pub fn cylinder(h: f64, r: f64, segments: u32) -> Self {
        let segments = if segments >= 3 { segments } else { 32 };
        Self::Cylinder { h, r, segments }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Block { x, y, z } => generate_block_mesh(*x, *y, *z),
            Self::Cylinder { h, r, segments } => generate_cylinder_mesh(*h, *r, *segments),
        }
    }
}

fn generate_block_mesh(x: f64, y: f64, z: f64) -> Mesh {
    let positions = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(x, 0.0, 0.0),
        Point3::new(x, y, 0.0),
        Point3::new(0.0, y, 0.0),
        Point3::new(0.0, 0.0, z),
        Point3::new(x, 0.0, z),
        Point3::new(x, y, z),
        Point3::new(0.0, y, z),
    ];

    let faces = [
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ];

    let triangles = faces
        .iter()
        .map(|[a, b, c]| Triangle::new(positions[*a], positions[*b], positions[*c]))
        .collect();

    Mesh::from_triangles(triangles)
}

fn generate_cylinder_mesh(height: f64, radius: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(segments as usize * 4);
    let bottom_center = Point3::new(0.0, 0.0, 0.0);
    let top_center = Point3::new(0.0, 0.0, height);

    for i in 0..segments {
        let a0 = 2.0 * PI * i as f64 / segments as f64;
        let a1 = 2.0 * PI * (i + 1) as f64 / segments as f64;

        let b0 = Point3::new(radius * a0.cos(), radius * a0.sin(), 0.0);
        let b1 = Point3::new(radius * a1.cos(), radius * a1.sin(), 0.0);
        let t0 = Point3::new(b0.x, b0.y, height);
        let t1 = Point3::new(b1.x, b1.y, height);

        mesh.add_triangle(Triangle::new(bottom_center, b1, b0));
        mesh.add_triangle(Triangle::new(top_center, t0, t1));
        mesh.add_triangle(Triangle::new(b0, b1, t1));
        mesh.add_triangle(Triangle::new(b0, t1, t0));
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::calculate_volume;

    #[test]
    fn test_block_winding_is_outward() {
        let mesh = Primitive::block(2.0, 3.0, 4.0).to_mesh();
        let signed: f64 = mesh.triangles.iter().map(|t| t.signed_volume()).sum();
        assert!((signed - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_cylinder_volume() {
        let mesh = Primitive::cylinder(10.0, 5.0, 256).to_mesh();
        assert_eq!(mesh.triangle_count(), 1024);

        let signed: f64 = mesh.triangles.iter().map(|t| t.signed_volume()).sum();
        assert!(signed > 0.0);

        let expected = PI * 25.0 * 10.0;
        assert!((calculate_volume(&mesh) - expected).abs() / expected < 1e-3);
    }
}
