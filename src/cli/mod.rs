// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI utilities for quoting and reporting

pub mod reporter;
pub mod runner;

pub use reporter::Reporter;
pub use runner::{quote_batch, quote_path, BatchOutcome};
