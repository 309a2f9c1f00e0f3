// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Estimator API: load → analyze → cost → advise

use crate::cost::{estimate, CostReport, ShopRates};
use crate::dfm::{suggest, Suggestion};
use crate::error::{AnalysisError, ConfigError, QuoteError};
use crate::geometry::{analyze, GeometryReport, Mesh};
use crate::io::{load_stl_with, LoaderOptions};
use crate::material::{Material, MaterialCatalog};
use serde::Serialize;
use tracing::info_span;

/// Everything produced for one part in one material
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub material: &'static Material,
    pub geometry: GeometryReport,
    pub cost: CostReport,
    pub suggestions: Vec<Suggestion>,
}

/// Payload handed to an external commentary service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPayload<'a> {
    pub geometry: &'a GeometryReport,
    pub material: &'a str,
}

impl Quote {
    pub fn prompt_payload(&self) -> PromptPayload<'_> {
        PromptPayload {
            geometry: &self.geometry,
            material: self.material.name,
        }
    }
}

impl PromptPayload<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Stateless pipeline over fixed shop rates and loader options
///
/// Holds no per-part state, so one estimator can serve concurrent quotes.
#[derive(Debug, Clone)]
pub struct Estimator {
    rates: ShopRates,
    loader: LoaderOptions,
}

impl Estimator {
    /// Estimator with default shop rates
    pub fn new() -> Self {
        Self {
            rates: ShopRates::default(),
            loader: LoaderOptions::default(),
        }
    }

    /// Estimator with custom shop rates, validated up front
    pub fn with_rates(rates: ShopRates) -> Result<Self, ConfigError> {
        rates.validate()?;
        Ok(Self {
            rates,
            loader: LoaderOptions::default(),
        })
    }

    pub fn with_loader(mut self, loader: LoaderOptions) -> Self {
        self.loader = loader;
        self
    }

    pub fn rates(&self) -> &ShopRates {
        &self.rates
    }

    pub fn loader(&self) -> &LoaderOptions {
        &self.loader
    }

    /// Full pipeline from raw STL bytes
    pub fn quote_bytes(&self, bytes: &[u8], material_key: &str) -> Result<Quote, QuoteError> {
        let _span = info_span!("quote", material = material_key, bytes = bytes.len()).entered();

        let material = MaterialCatalog::lookup(material_key)?;
        let mesh = load_stl_with(bytes, &self.loader)?;
        Ok(self.quote_mesh(&mesh, material)?)
    }

    /// Pipeline from an already loaded mesh
    pub fn quote_mesh(&self, mesh: &Mesh, material: &'static Material) -> Result<Quote, AnalysisError> {
        let geometry = analyze(mesh)?;
        Ok(self.quote_geometry(geometry, material))
    }

    /// Re-cost an analyzed part in another material without reloading the mesh
    pub fn requote(&self, geometry: &GeometryReport, material_key: &str) -> Result<Quote, ConfigError> {
        let material = MaterialCatalog::lookup(material_key)?;
        Ok(self.quote_geometry(geometry.clone(), material))
    }

    fn quote_geometry(&self, geometry: GeometryReport, material: &'static Material) -> Quote {
        let cost = estimate(&geometry, material, &self.rates);
        let suggestions = suggest(&geometry, material, cost.total_cost_usd);

        tracing::info!(
            material = material.key,
            total = cost.total_cost_usd,
            suggestions = suggestions.len(),
            "quote ready"
        );

        Quote {
            material,
            geometry,
            cost,
            suggestions,
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::geometry::Primitive;
    use crate::io::write_stl_binary;

    #[test]
    fn test_unknown_material_checked_first() {
        let estimator = Estimator::new();
        let err = estimator.quote_bytes(&[], "mithril").unwrap_err();
        assert!(matches!(
            err,
            QuoteError::Config(ConfigError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn test_parse_errors_propagate() {
        let err = Estimator::new().quote_bytes(&[0u8; 10], "nylon").unwrap_err();
        assert!(matches!(err, QuoteError::Parse(ParseError::Truncated { .. })));
    }

    #[test]
    fn test_requote_changes_only_cost() {
        let bytes = write_stl_binary(&Primitive::block(40.0, 20.0, 10.0).to_mesh()).unwrap();
        let estimator = Estimator::new();

        let aluminum = estimator.quote_bytes(&bytes, "aluminum_6061").unwrap();
        let titanium = estimator.requote(&aluminum.geometry, "titanium").unwrap();

        assert_eq!(aluminum.geometry, titanium.geometry);
        assert!(titanium.cost.total_cost_usd > aluminum.cost.total_cost_usd);
        assert_eq!(titanium.material.key, "titanium");
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let rates = ShopRates::default().with_batch_size(0);
        assert!(Estimator::with_rates(rates).is_err());
    }

    #[test]
    fn test_configured_estimator_keeps_settings() {
        let estimator = Estimator::with_rates(ShopRates::default().with_batch_size(10))
            .unwrap()
            .with_loader(LoaderOptions::binary_only());
        assert_eq!(estimator.rates().batch_size, 10);
        assert!(!estimator.loader().allow_ascii);

        let text = b"solid part\nendsolid part\n";
        assert!(matches!(
            estimator.quote_bytes(text, "nylon"),
            Err(QuoteError::Parse(ParseError::UnsupportedEncoding { .. }))
        ));
    }

    #[test]
    fn test_prompt_payload() {
        let mesh = Primitive::cube(10.0).to_mesh();
        let material = MaterialCatalog::lookup("abs_plastic").unwrap();
        let quote = Estimator::new().quote_mesh(&mesh, material).unwrap();

        let json = quote.prompt_payload().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["material"], "ABS Plastic");
        assert_eq!(value["geometry"]["triangleCount"], 12);
    }
}
