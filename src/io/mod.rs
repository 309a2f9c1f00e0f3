// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STL loading and exporting

mod exporter;
mod stl;

pub use exporter::{export_stl, write_stl_ascii, write_stl_binary};
pub use stl::{detect_encoding, load_stl, load_stl_with, LoaderOptions, StlEncoding};

use crate::geometry::Mesh;
use anyhow::{Context, Result};
use std::path::Path;

/// Read an STL file from disk
pub fn import_stl_file(path: impl AsRef<Path>, options: &LoaderOptions) -> Result<Mesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read STL file: {}", path.display()))?;

    load_stl_with(&bytes, options)
        .with_context(|| format!("Failed to parse STL file: {}", path.display()))
}
