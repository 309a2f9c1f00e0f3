// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the estimation pipeline
//!
//! Each stage reports its own error enum so callers can match on the
//! failure that matters to them. [`QuoteError`] unifies them for the
//! end-to-end pipeline.

use thiserror::Error;

/// Failure to turn a byte buffer into a mesh
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Fewer bytes than the header and declared records require
    #[error("STL data truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required by the header and the declared triangle count.
        expected: u64,
        /// Bytes actually present.
        actual: usize,
    },

    /// The file declares or contains no triangles
    #[error("STL data contains no triangles")]
    EmptyMesh,

    /// The encoding was recognized but is not accepted
    #[error("Unsupported STL encoding: {encoding}")]
    UnsupportedEncoding {
        /// Name of the rejected encoding.
        encoding: String,
    },

    /// A vertex coordinate is NaN or infinite
    #[error("Triangle {triangle} has a non-finite vertex coordinate")]
    NonFiniteVertex {
        /// Zero-based index of the offending triangle.
        triangle: usize,
    },

    /// The ASCII body could not be read
    #[error("Malformed ASCII STL: {reason}")]
    MalformedAscii {
        /// Reader diagnostic.
        reason: String,
    },
}

/// Failure to derive geometric quantities from a mesh
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Degenerate mesh: {reason}")]
    DegenerateMesh { reason: String },
}

impl AnalysisError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateMesh {
            reason: reason.into(),
        }
    }
}

/// Failure to resolve configuration into usable values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The material key is not in the catalog
    #[error("Unknown material: {key} (expected one of: {known})")]
    UnknownMaterial { key: String, known: String },

    /// A shop rate is out of its valid range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Any failure along the load → analyze → cost → advise pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::Truncated {
            expected: 134,
            actual: 100,
        };
        assert_eq!(
            err.to_string(),
            "STL data truncated: expected 134 bytes, got 100"
        );

        let err = ConfigError::UnknownMaterial {
            key: "unobtainium".into(),
            known: "abs, nylon".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown material: unobtainium (expected one of: abs, nylon)"
        );
    }

    #[test]
    fn test_quote_error_is_transparent() {
        let err: QuoteError = AnalysisError::degenerate("zero volume").into();
        assert_eq!(err.to_string(), "Degenerate mesh: zero volume");
        assert!(matches!(err, QuoteError::Analysis(_)));
    }
}
