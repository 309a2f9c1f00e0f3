// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle-soup mesh representation

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Triangle defined by three vertex positions, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
    pub v3: Point3<f64>,
}

impl Triangle {
    pub fn new(v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        Self { v1, v2, v3 }
    }

    pub fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Signed volume of the tetrahedron spanned by the triangle and the origin
    pub fn signed_volume(&self) -> f64 {
        self.v1.coords.dot(&self.v2.coords.cross(&self.v3.coords)) / 6.0
    }

    pub fn area(&self) -> f64 {
        let edge1 = self.v2 - self.v1;
        let edge2 = self.v3 - self.v1;
        edge1.cross(&edge2).norm() / 2.0
    }

    /// Face normal from the winding order; zero for degenerate triangles
    pub fn normal(&self) -> Vector3<f64> {
        let n = (self.v2 - self.v1).cross(&(self.v3 - self.v1));
        n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros)
    }

    /// Same triangle with the opposite winding
    pub fn flipped(&self) -> Self {
        Self::new(self.v1, self.v3, self.v2)
    }

    pub fn is_finite(&self) -> bool {
        self.vertices()
            .iter()
            .all(|p| p.coords.iter().all(|c| c.is_finite()))
    }
}

/// Ordered sequence of triangles with no shared topology
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_triangles(&self.triangles)
    }

    /// Append another mesh's triangles
    pub fn merge(&mut self, other: &Mesh) {
        self.triangles.extend_from_slice(&other.triangles);
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for triangle in &mut self.triangles {
            triangle.v1 += offset;
            triangle.v2 += offset;
            triangle.v3 += offset;
        }
    }

    /// Reverse the winding of every triangle
    pub fn flip_winding(&mut self) {
        for triangle in &mut self.triangles {
            *triangle = triangle.flipped();
        }
    }
}
