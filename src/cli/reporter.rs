// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::runner::BatchOutcome;
use crate::dfm::{Impact, Suggestion};
use crate::geometry::GeometryReport;
use crate::material::MaterialCatalog;
use crate::{CostReport, Quote};
use colored::*;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print the geometry section
    pub fn report_geometry(file: &str, geometry: &GeometryReport) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Part:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        println!("{}", "Geometry:".bold());
        Self::print_field("Volume", &format!("{:.2} cm³", geometry.volume_cm3));
        Self::print_field("Surface Area", &format!("{:.2} cm²", geometry.surface_area_cm2));
        Self::print_field(
            "Bounding Box",
            &format!(
                "{:.1} × {:.1} × {:.1} mm",
                geometry.bounding_box.x, geometry.bounding_box.y, geometry.bounding_box.z
            ),
        );
        Self::print_field("Triangles", &geometry.triangle_count.to_string());
        Self::print_field(
            "Complexity",
            &Self::color_complexity(geometry.complexity_score).to_string(),
        );
    }

    /// Print a full quote: geometry, cost, and suggestions
    pub fn report_quote(file: &str, quote: &Quote) {
        Self::report_geometry(file, &quote.geometry);
        Self::report_cost(quote.material.name, &quote.cost);
        Self::report_suggestions(&quote.suggestions);
        println!("{}", "━".repeat(80).bright_black());
    }

    fn report_cost(material: &str, cost: &CostReport) {
        println!("\n{}", "Cost:".bold());
        Self::print_field("Material", material);
        Self::print_field("Mass", &format!("{:.2} g", cost.mass_kg * 1000.0));
        Self::print_field("Material Cost", &format!("${:.2}", cost.material_cost_usd));
        Self::print_field(
            "Machining Time",
            &format!("{:.1} min", cost.machining_time_minutes),
        );
        Self::print_field(
            "Labor / Setup / Machine",
            &format!(
                "${:.2} / ${:.2} / ${:.2}",
                cost.breakdown.labor_per_unit,
                cost.breakdown.setup_per_unit,
                cost.breakdown.machine_per_unit
            ),
        );
        println!(
            "  {} {} {}",
            "Unit Cost:".bright_black(),
            format!("${:.2}", cost.total_cost_usd).green().bold(),
            format!("(qty {})", cost.batch_size).bright_black()
        );
    }

    fn report_suggestions(suggestions: &[Suggestion]) {
        println!("\n{}", "DfM Suggestions:".bold());
        for (index, suggestion) in suggestions.iter().enumerate() {
            let badge = match suggestion.impact {
                Impact::High => "HIGH".red().bold(),
                Impact::Medium => "MEDIUM".yellow().bold(),
                Impact::Low => "LOW".bright_black().bold(),
            };
            println!("  {}. {} [{}]", index + 1, suggestion.title.bold(), badge);
            println!("     {}", suggestion.description.bright_black());
            println!("     {} {}", "💰".green(), suggestion.savings_estimate);
        }
    }

    /// Print the material table
    pub fn report_materials() {
        println!(
            "{:<16} {:<22} {:>10} {:>10} {:>14}",
            "KEY".bold(),
            "NAME".bold(),
            "g/cm³".bold(),
            "$/kg".bold(),
            "MACHINABILITY".bold()
        );
        for material in MaterialCatalog::all() {
            println!(
                "{:<16} {:<22} {:>10.2} {:>10.2} {:>14.2}",
                material.key.cyan(),
                material.name,
                material.density_g_per_cm3,
                material.price_per_kg,
                material.machinability
            );
        }
    }

    /// Print batch summary
    pub fn report_batch(outcomes: &[BatchOutcome]) {
        let total = outcomes.len();
        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        let passed = total - failed;

        println!("\n{}", "═".repeat(80));
        println!("{}", "Batch Summary".bold());
        println!("{}", "═".repeat(80));

        for outcome in outcomes {
            match (&outcome.quote, &outcome.error) {
                (Some(quote), _) => println!(
                    "  {} {:<50} {}",
                    "✅".green(),
                    outcome.file,
                    format!("${:.2}", quote.cost.total_cost_usd).cyan()
                ),
                (None, Some(error)) => {
                    println!("  {} {:<50} {}", "❌".red(), outcome.file, error.red())
                }
                (None, None) => {}
            }
        }

        println!(
            "\n{} {} | {} {} | {} {}",
            "Total:".bright_black(),
            total.to_string().cyan(),
            "Quoted:".bright_black(),
            passed.to_string().green(),
            "Failed:".bright_black(),
            if failed > 0 {
                failed.to_string().red()
            } else {
                failed.to_string().green()
            }
        );
        println!("{}", "═".repeat(80));
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_field(name: &str, value: &str) {
        println!("  {} {}", format!("{}:", name).bright_black(), value);
    }

    fn color_complexity(score: f64) -> ColoredString {
        let text = format!("{:.1}/10", score);
        if score > 7.0 {
            text.red()
        } else if score > 4.0 {
            text.yellow()
        } else {
            text.green()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_complexity_text() {
        colored::control::set_override(false);
        assert_eq!(Reporter::color_complexity(4.3036).to_string(), "4.3/10");
        assert_eq!(Reporter::color_complexity(10.0).to_string(), "10.0/10");
    }
}
