// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ordered DfM rule table

use super::{Impact, Savings, Suggestion};
use crate::geometry::GeometryReport;
use crate::material::Material;

/// Complexity score above which simplification is suggested
pub const COMPLEXITY_THRESHOLD: f64 = 7.0;
/// Bounding box aspect ratio above which deflection is a concern
pub const ASPECT_RATIO_THRESHOLD: f64 = 5.0;
/// Machinability below which a substitute material is suggested
pub const MACHINABILITY_THRESHOLD: f64 = 0.6;
/// Surface-to-volume ratio above which finishing dominates
pub const SURFACE_RATIO_THRESHOLD: f64 = 8.0;
/// Triangle count above which the export is considered over-tessellated
pub const TRIANGLE_COUNT_THRESHOLD: usize = 50_000;

/// Inputs every rule sees
pub struct RuleContext<'a> {
    pub report: &'a GeometryReport,
    pub material: &'a Material,
    pub total_cost: f64,
}

/// A single predicate → suggestion mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfmRule {
    ReduceComplexity,
    HighAspectRatio,
    AlternativeMaterial,
    HighSurfaceRatio,
    ModelResolution,
    StandardTolerances,
    StandardTooling,
}

impl DfmRule {
    /// Evaluation order, which is also the output order
    pub const ALL: [DfmRule; 7] = [
        DfmRule::ReduceComplexity,
        DfmRule::HighAspectRatio,
        DfmRule::AlternativeMaterial,
        DfmRule::HighSurfaceRatio,
        DfmRule::ModelResolution,
        DfmRule::StandardTolerances,
        DfmRule::StandardTooling,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::ReduceComplexity => "Reduce Geometric Complexity",
            Self::HighAspectRatio => "High Aspect Ratio Detected",
            Self::AlternativeMaterial => "Consider Alternative Materials",
            Self::HighSurfaceRatio => "High Surface-to-Volume Ratio",
            Self::ModelResolution => "Optimize Model Resolution",
            Self::StandardTolerances => "Specify Standard Tolerances",
            Self::StandardTooling => "Design for Standard Tooling",
        }
    }

    pub fn impact(&self) -> Impact {
        match self {
            Self::ReduceComplexity | Self::AlternativeMaterial | Self::StandardTolerances => {
                Impact::High
            }
            Self::HighAspectRatio | Self::HighSurfaceRatio | Self::StandardTooling => {
                Impact::Medium
            }
            Self::ModelResolution => Impact::Low,
        }
    }

    /// Savings band as fractions of the unit cost; `None` for non-monetary rules
    pub fn savings_band(&self) -> Option<(f64, f64)> {
        match self {
            Self::ReduceComplexity => Some((0.15, 0.25)),
            Self::HighAspectRatio => Some((0.10, 0.15)),
            Self::AlternativeMaterial => Some((0.20, 0.40)),
            Self::HighSurfaceRatio => Some((0.08, 0.12)),
            Self::ModelResolution => None,
            Self::StandardTolerances => Some((0.15, 0.30)),
            Self::StandardTooling => Some((0.05, 0.10)),
        }
    }

    pub fn applies(&self, ctx: &RuleContext<'_>) -> bool {
        match self {
            Self::ReduceComplexity => ctx.report.complexity_score > COMPLEXITY_THRESHOLD,
            Self::HighAspectRatio => ctx.report.aspect_ratio > ASPECT_RATIO_THRESHOLD,
            Self::AlternativeMaterial => ctx.material.machinability < MACHINABILITY_THRESHOLD,
            Self::HighSurfaceRatio => {
                ctx.report.surface_to_volume_ratio > SURFACE_RATIO_THRESHOLD
            }
            Self::ModelResolution => ctx.report.triangle_count > TRIANGLE_COUNT_THRESHOLD,
            Self::StandardTolerances | Self::StandardTooling => true,
        }
    }

    /// The suggestion this rule emits, if its predicate holds
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Suggestion> {
        if !self.applies(ctx) {
            return None;
        }

        let savings_estimate = match self.savings_band() {
            Some((low, high)) => Savings::range(ctx.total_cost, low, high),
            None => Savings::note("Better processing efficiency and reduced CAM programming time"),
        };

        Some(Suggestion {
            title: self.title().to_string(),
            description: self.describe(ctx),
            impact: self.impact(),
            savings_estimate,
        })
    }

    fn describe(&self, ctx: &RuleContext<'_>) -> String {
        match self {
            Self::ReduceComplexity => format!(
                "Your part has a complexity score of {:.1}/10, indicating intricate features \
                 that increase machining time. Consider simplifying curves, reducing the number \
                 of surfaces, or using standard geometries where possible.",
                ctx.report.complexity_score
            ),
            Self::HighAspectRatio => format!(
                "The part has an aspect ratio of {:.1}:1, which may cause deflection during \
                 machining and require specialized tooling or multiple setups. Consider \
                 redesigning to reduce the length-to-width ratio.",
                ctx.report.aspect_ratio
            ),
            Self::AlternativeMaterial => format!(
                "{} has lower machinability, increasing tool wear and cycle time. If mechanical \
                 properties allow, switching to {} could reduce costs by 20-40% while \
                 maintaining similar strength-to-weight ratios.",
                ctx.material.name,
                ctx.material.alternative_names().join(" or ")
            ),
            Self::HighSurfaceRatio => format!(
                "A surface-to-volume ratio of {:.1} suggests thin walls or numerous pockets, \
                 leading to longer finish machining times. Consolidate features or increase \
                 wall thickness where structurally acceptable.",
                ctx.report.surface_to_volume_ratio
            ),
            Self::ModelResolution => format!(
                "High triangle count ({}) may indicate over-tessellation. Export STL files with \
                 appropriate tolerance settings to reduce file size without compromising \
                 critical dimensions.",
                ctx.report.triangle_count
            ),
            Self::StandardTolerances => "Unless critical for function, use standard tolerances \
                 (±0.125mm for general features). Tight tolerances (±0.025mm or finer) can \
                 double machining costs due to required precision equipment and inspection."
                .to_string(),
            Self::StandardTooling => "Use standard drill sizes, thread pitches, and fillet radii \
                 to avoid custom tooling. Standard end mills (3mm, 6mm, 12mm) and drills \
                 significantly reduce setup time and tooling costs."
                .to_string(),
        }
    }
}
