// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cost module - shop rates and the unit cost model

mod config;
mod model;

pub use config::{ShopRates, CONFIG_FILE};
pub use model::{estimate, CostBreakdown, CostReport};
