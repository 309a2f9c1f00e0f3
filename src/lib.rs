// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! cncquote
//!
//! Manufacturability and unit cost estimation for CNC machined parts
//! supplied as STL meshes, with rule-based design-for-manufacturing advice.

pub mod cli;
pub mod cost;
pub mod dfm;
pub mod error;
pub mod estimator;
pub mod geometry;
pub mod io;
pub mod material;

pub use cost::{CostReport, ShopRates};
pub use dfm::{Impact, Savings, Suggestion};
pub use error::{AnalysisError, ConfigError, ParseError, QuoteError};
pub use estimator::{Estimator, PromptPayload, Quote};
pub use geometry::{analyze, GeometryReport, Mesh, Triangle};
pub use io::{load_stl, LoaderOptions};
pub use material::{Material, MaterialCatalog};

use anyhow::{Context, Result};
use std::path::Path;

/// Quote an STL file with default shop rates
pub fn quote_file(path: impl AsRef<Path>, material: &str) -> Result<Quote> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read STL file: {}", path.display()))?;

    Estimator::new()
        .quote_bytes(&bytes, material)
        .with_context(|| format!("Failed to quote {}", path.display()))
}

/// Initialize logging
///
/// Honors `RUST_LOG`; otherwise logs at `info`, or `debug` when verbose.
/// Output goes to stderr so machine-readable stdout stays clean.
pub fn init_logging(verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_quote_file() -> Result<()> {
        let mesh = geometry::Primitive::cube(10.0).to_mesh();
        let mut file = NamedTempFile::with_suffix(".stl")?;
        file.write_all(&io::write_stl_binary(&mesh)?)?;

        let quote = quote_file(file.path(), "aluminum_6061")?;
        assert_eq!(quote.geometry.triangle_count, 12);
        Ok(())
    }

    #[test]
    fn test_quote_missing_file() {
        assert!(quote_file("/nonexistent/part.stl", "nylon").is_err());
    }
}
