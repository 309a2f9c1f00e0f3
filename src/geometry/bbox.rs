// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::Triangle;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut bbox = Self::empty();
        for triangle in triangles {
            for vertex in triangle.vertices() {
                bbox.expand_to_include(&vertex);
            }
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths per axis; all zero for an empty box
    pub fn size(&self) -> Extents {
        if self.is_empty() {
            return Extents::new(0.0, 0.0, 0.0);
        }
        Extents::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

/// Bounding box edge lengths in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Extents {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn max_axis(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    pub fn min_axis(&self) -> f64 {
        self.x.min(self.y).min(self.z)
    }

    /// Longest axis over shortest axis. Infinite when the box is flat.
    pub fn aspect_ratio(&self) -> f64 {
        self.max_axis() / self.min_axis()
    }

    /// Box volume converted from mm³ to cm³
    pub fn volume_cm3(&self) -> f64 {
        self.x * self.y * self.z / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let mut bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        bbox.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        bbox.expand_to_include(&Point3::new(-1.0, -2.0, -3.0));

        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.size(), Extents::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_extents() {
        let extents = Extents::new(100.0, 10.0, 20.0);
        assert_eq!(extents.aspect_ratio(), 10.0);
        assert_eq!(extents.volume_cm3(), 20.0);
        assert_eq!(BoundingBox::empty().size(), Extents::new(0.0, 0.0, 0.0));
    }
}
