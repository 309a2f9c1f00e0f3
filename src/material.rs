// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Static catalog of stock materials

use crate::error::ConfigError;
use serde::Serialize;

/// Physical and economic properties of a stock material
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub key: &'static str,
    pub name: &'static str,
    pub density_g_per_cm3: f64,
    pub price_per_kg: f64,
    /// Relative ease of removal in (0, 1]; lower is harder to machine
    pub machinability: f64,
}

static CATALOG: [Material; 7] = [
    Material {
        key: "aluminum_6061",
        name: "Aluminum 6061-T6",
        density_g_per_cm3: 2.70,
        price_per_kg: 4.50,
        machinability: 0.80,
    },
    Material {
        key: "aluminum_7075",
        name: "Aluminum 7075-T6",
        density_g_per_cm3: 2.81,
        price_per_kg: 8.50,
        machinability: 0.70,
    },
    Material {
        key: "steel_mild",
        name: "Mild Steel 1018",
        density_g_per_cm3: 7.87,
        price_per_kg: 1.20,
        machinability: 0.60,
    },
    Material {
        key: "steel_stainless",
        name: "Stainless Steel 304",
        density_g_per_cm3: 8.00,
        price_per_kg: 3.80,
        machinability: 0.50,
    },
    Material {
        key: "titanium",
        name: "Titanium Ti-6Al-4V",
        density_g_per_cm3: 4.43,
        price_per_kg: 35.00,
        machinability: 0.30,
    },
    Material {
        key: "abs_plastic",
        name: "ABS Plastic",
        density_g_per_cm3: 1.05,
        price_per_kg: 3.50,
        machinability: 0.95,
    },
    Material {
        key: "nylon",
        name: "Nylon PA12",
        density_g_per_cm3: 1.01,
        price_per_kg: 8.00,
        machinability: 0.90,
    },
];

impl Material {
    /// Catalog keys of easier-to-machine substitutes, best first
    pub fn alternatives(&self) -> &'static [&'static str] {
        match self.key {
            "titanium" => &["aluminum_7075", "steel_mild"],
            "steel_stainless" => &["aluminum_6061", "steel_mild"],
            "aluminum_7075" => &["aluminum_6061"],
            _ => &["aluminum_6061"],
        }
    }

    /// Display names of [`Material::alternatives`]
    pub fn alternative_names(&self) -> Vec<&'static str> {
        self.alternatives()
            .iter()
            .filter_map(|key| MaterialCatalog::lookup(key).ok())
            .map(|material| material.name)
            .collect()
    }
}

/// Read-only access to the material table
pub struct MaterialCatalog;

impl MaterialCatalog {
    pub fn all() -> &'static [Material] {
        &CATALOG
    }

    /// Resolve a catalog key such as `steel_mild` or `Steel-Mild`
    pub fn lookup(key: &str) -> Result<&'static Material, ConfigError> {
        let normalized = key.trim().to_ascii_lowercase().replace('-', "_");
        CATALOG
            .iter()
            .find(|material| material.key == normalized)
            .ok_or_else(|| ConfigError::UnknownMaterial {
                key: key.to_string(),
                known: Self::keys().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn keys() -> impl Iterator<Item = &'static str> {
        CATALOG.iter().map(|material| material.key)
    }
}
