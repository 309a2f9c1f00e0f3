// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! cncquote CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use cncquote::cli::{quote_batch, quote_path, Reporter};
use cncquote::io::{import_stl_file, LoaderOptions};
use cncquote::{analyze, init_logging, Estimator, ShopRates};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cncquote")]
#[command(about = "CNC machining cost estimation and DfM advice for STL parts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report geometry of an STL file
    Analyze {
        /// Input STL file
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Quote a part in one material
    Quote {
        /// Input STL file
        input: PathBuf,

        /// Material key (see `materials`)
        #[arg(short, long, default_value = "aluminum_6061")]
        material: String,

        /// Shop rates TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the batch size
        #[arg(short, long)]
        batch_size: Option<u32>,

        /// Reject ASCII STL input
        #[arg(long)]
        binary_only: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Quote many parts in parallel
    Batch {
        /// Input STL files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Material key (see `materials`)
        #[arg(short, long, default_value = "aluminum_6061")]
        material: String,

        /// Shop rates TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write a JSON summary here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the material catalog
    Materials,

    /// Write the default shop rates as TOML
    Config {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match &cli.command {
        Commands::Analyze { input, json } => analyze_command(input, *json)?,
        Commands::Quote {
            input,
            material,
            config,
            batch_size,
            binary_only,
            json,
        } => {
            let mut rates = ShopRates::load_from(config.as_deref())?;
            if let Some(batch_size) = batch_size {
                rates.batch_size = *batch_size;
            }
            let loader = if *binary_only {
                LoaderOptions::binary_only()
            } else {
                LoaderOptions::default()
            };
            let estimator = Estimator::with_rates(rates)?.with_loader(loader);
            quote_command(&estimator, input, material, *json)?;
        }
        Commands::Batch {
            inputs,
            material,
            config,
            out,
        } => {
            let estimator = Estimator::with_rates(ShopRates::load_from(config.as_deref())?)?;
            batch_command(&estimator, inputs, material, out.as_deref(), cli.verbose)?;
        }
        Commands::Materials => Reporter::report_materials(),
        Commands::Config { output } => {
            let rates = ShopRates::default();
            match output {
                Some(path) => {
                    rates.save(path)?;
                    Reporter::success(&format!("Wrote {}", path.display()));
                }
                None => print!("{}", rates.to_toml()?),
            }
        }
    }

    Ok(())
}

fn analyze_command(input: &Path, json: bool) -> Result<()> {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }

    let mesh = import_stl_file(input, &LoaderOptions::default())?;
    let geometry = analyze(&mesh)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&geometry)?);
    } else {
        Reporter::report_geometry(&input.display().to_string(), &geometry);
    }

    Ok(())
}

fn quote_command(estimator: &Estimator, input: &Path, material: &str, json: bool) -> Result<()> {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }

    let quote = quote_path(estimator, input, material)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        Reporter::report_quote(&input.display().to_string(), &quote);
    }

    Ok(())
}

fn batch_command(
    estimator: &Estimator,
    inputs: &[PathBuf],
    material: &str,
    out: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let progress = if verbose {
        None
    } else {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let outcomes = quote_batch(estimator, inputs, material, progress.as_ref());

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Reporter::report_batch(&outcomes);

    if let Some(path) = out {
        std::fs::write(path, serde_json::to_string_pretty(&outcomes)?)?;
        Reporter::success(&format!("Summary written to {}", path.display()));
    }

    if outcomes.iter().any(|o| !o.is_ok()) {
        std::process::exit(1);
    }

    Ok(())
}
