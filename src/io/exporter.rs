// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL writers

use crate::geometry::Mesh;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encode a mesh as binary STL bytes
pub fn write_stl_binary(mesh: &Mesh) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(84 + mesh.triangle_count() * 50);
    stl_io::write_stl(&mut bytes, to_stl_triangles(mesh).iter())
        .context("Failed to encode binary STL")?;
    Ok(bytes)
}

/// Encode a mesh as ASCII STL text
pub fn write_stl_ascii(mesh: &Mesh, name: &str) -> String {
    let mut out = format!("solid {}\n", name);

    for tri in &mesh.triangles {
        let n = tri.normal();
        out.push_str(&format!("  facet normal {} {} {}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in tri.vertices() {
            out.push_str(&format!("      vertex {} {} {}\n", v.x, v.y, v.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {}\n", name));
    out
}

/// Export mesh to an STL file; `.stl` gets binary, anything else ASCII
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let binary = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("stl"))
        .unwrap_or(false);

    let file = File::create(path)
        .with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    if binary {
        writer.write_all(&write_stl_binary(mesh)?)?;
    } else {
        writer.write_all(write_stl_ascii(mesh, "mesh").as_bytes())?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write STL file: {}", path.display()))?;
    Ok(())
}

fn to_stl_triangles(mesh: &Mesh) -> Vec<stl_io::Triangle> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let vertex = |p: nalgebra::Point3<f64>| StlVertex::new([p.x as f32, p.y as f32, p.z as f32]);

    mesh.triangles
        .iter()
        .map(|tri| {
            let n = tri.normal();
            StlTriangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [vertex(tri.v1), vertex(tri.v2), vertex(tri.v3)],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use crate::io::load_stl;
    use tempfile::NamedTempFile;

    #[test]
    fn test_binary_layout() -> Result<()> {
        let mesh = Primitive::cube(10.0).to_mesh();
        let bytes = write_stl_binary(&mesh)?;

        assert_eq!(bytes.len(), 84 + 12 * 50);
        assert_eq!(&bytes[80..84], &12u32.to_le_bytes());
        Ok(())
    }

    #[test]
    fn test_export_binary_file() -> Result<()> {
        let mesh = Primitive::cube(10.0).to_mesh();
        let file = NamedTempFile::with_suffix(".stl")?;

        export_stl(&mesh, file.path())?;

        let loaded = load_stl(&std::fs::read(file.path())?)?;
        assert_eq!(loaded, mesh);
        Ok(())
    }

    #[test]
    fn test_ascii_text_shape() {
        let mesh = Primitive::cube(1.0).to_mesh();
        let text = write_stl_ascii(&mesh, "cube");

        assert!(text.starts_with("solid cube\n"));
        assert!(text.ends_with("endsolid cube\n"));
        assert_eq!(text.matches("facet normal").count(), 12);
    }
}
