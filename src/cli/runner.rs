// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel batch quoting

use crate::estimator::{Estimator, Quote};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of quoting one file in a batch
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Quote a single file on disk
pub fn quote_path(estimator: &Estimator, path: &Path, material: &str) -> Result<Quote> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read STL file: {}", path.display()))?;
    let quote = estimator
        .quote_bytes(&bytes, material)
        .with_context(|| format!("Failed to quote {}", path.display()))?;
    Ok(quote)
}

/// Quote many files in parallel
///
/// A failing file is recorded in its outcome and does not stop the others.
/// Outcomes keep the input order.
pub fn quote_batch(
    estimator: &Estimator,
    paths: &[PathBuf],
    material: &str,
    progress: Option<&ProgressBar>,
) -> Vec<BatchOutcome> {
    info!(
        files = paths.len(),
        material,
        batch_size = estimator.rates().batch_size,
        allow_ascii = estimator.loader().allow_ascii,
        "quoting batch"
    );

    paths
        .par_iter()
        .map(|path| {
            let file = path.display().to_string();
            let outcome = match quote_path(estimator, path, material) {
                Ok(quote) => BatchOutcome {
                    file,
                    quote: Some(quote),
                    error: None,
                },
                Err(e) => {
                    warn!(file = %file, error = %format!("{:#}", e), "quote failed");
                    BatchOutcome {
                        file,
                        quote: None,
                        error: Some(format!("{:#}", e)),
                    }
                }
            };
            if let Some(pb) = progress {
                pb.inc(1);
            }
            outcome
        })
        .collect()
}
