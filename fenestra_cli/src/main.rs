//! # Fenestra CLI
//!
//! Reads JSON documents from disk, runs them through `fenestra_core`, and
//! prints the resulting payloads as JSON on stdout. Logs go to stderr.
//!
//! ```text
//! fenestra modules [--category <name>]
//! fenestra requirements <module_id>
//! fenestra cart <batch.json> [--config fenestra.toml] [--unit cm]
//! fenestra quote <quote_config.json>
//! fenestra preview <quote_response.json> [quote_config.json]
//! ```
//!
//! Nothing here talks to the calculation or quote services.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fenestra_core::config::{PipelineConfig, CONFIG_ENV_VAR};
use fenestra_core::modules::{requirements_for, requirements_for_str};
use fenestra_core::quote::{to_quote_preview, to_quote_request, QuoteConfiguration, QuoteResponse};
use fenestra_core::validation::missing_fields;
use fenestra_core::{
    assemble_request, normalize_batch, registry, CalculationRequest, Category, GlazingError, GlazingResult,
    LengthUnit, MeasurementBatch, ModuleId,
};

#[derive(Parser, Debug)]
#[command(name = "fenestra")]
#[command(about = "Turn glazing measurements into calculation and quote payloads")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List enabled categories, their types and modules
    Modules {
        /// Only list this category (e.g. "nets", "curtain wall")
        #[arg(long)]
        category: Option<Category>,
    },
    /// Print the form field requirements of a module id
    Requirements {
        /// Wire id such as `casement_d_curve`
        module_id: String,
    },
    /// Build the calculation request for a measurement batch
    Cart {
        /// Batch JSON file
        batch: PathBuf,
        /// Pipeline config (TOML)
        #[arg(long, env = CONFIG_ENV_VAR)]
        config: Option<PathBuf>,
        /// Overrides the unit named in the batch
        #[arg(long)]
        unit: Option<LengthUnit>,
    },
    /// Build the outbound quote request from a quote configuration
    Quote {
        /// Quote configuration JSON file
        config: PathBuf,
    },
    /// Build the display preview of a quote service response
    Preview {
        /// Quote response JSON file
        response: PathBuf,
        /// Quote configuration the response was generated from
        original: Option<PathBuf>,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> GlazingResult<T> {
    let source = fs::read_to_string(path)
        .map_err(|e| GlazingError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(serde_json::from_str(&source)?)
}

fn print_json<T: Serialize>(value: &T) -> GlazingResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> GlazingResult<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path),
        None => Ok(PipelineConfig::default()),
    }
}

fn list_modules(only: Option<Category>) -> GlazingResult<()> {
    let reg = registry();
    if let Some(category) = only {
        if !reg.is_category_enabled(category) {
            tracing::warn!(%category, "category is disabled, nothing to list");
        }
    }

    println!("Enabled categories and types");
    println!("============================");
    for category in reg.enabled_categories().into_iter().filter(|c| only.map_or(true, |o| o == *c)) {
        println!();
        println!("{}", category);
        for t in reg.enabled_types(category) {
            let Some(module_id) = t.module_id else { continue };
            let req = requirements_for(module_id);
            let mut fields = vec![req.width_label, req.height_label];
            if req.requires_panel || req.requires_vertical_panels {
                fields.push(req.panel_label);
            }
            println!("  {:<36} {:<22} [{}]", t.value, module_id.as_str(), fields.join(", "));
        }
    }
    Ok(())
}

fn requirements(module_id: &str) -> GlazingResult<()> {
    if module_id.parse::<ModuleId>().is_err() {
        tracing::warn!(module_id, "unknown module id, showing default requirements");
    }
    print_json(&requirements_for_str(module_id))
}

/// A batch row whose module asks for fields the row left empty.
#[derive(Debug, Clone, PartialEq)]
struct IncompleteRow {
    row: usize,
    module_id: ModuleId,
    missing: Vec<&'static str>,
}

#[derive(Debug)]
struct CartOutcome {
    request: CalculationRequest,
    incomplete: Vec<IncompleteRow>,
}

/// Normalize a batch file once, then check every row against the module it
/// was built for.
fn build_cart(batch_path: &Path, config_path: Option<&Path>, unit: Option<LengthUnit>) -> GlazingResult<CartOutcome> {
    let config = load_config(config_path)?;
    let mut batch: MeasurementBatch = read_json(batch_path)?;
    if unit.is_some() {
        batch.unit = unit;
    }

    let specs = normalize_batch(&batch, &config);
    let incomplete: Vec<IncompleteRow> = batch
        .entries
        .iter()
        .zip(&specs)
        .enumerate()
        .filter_map(|(row, (entry, spec))| {
            let missing = missing_fields(entry, spec.module_id);
            (!missing.is_empty()).then_some(IncompleteRow { row, module_id: spec.module_id, missing })
        })
        .collect();

    for r in &incomplete {
        tracing::warn!(row = r.row, module_id = %r.module_id, missing = ?r.missing, "entry has empty required fields");
    }

    Ok(CartOutcome {
        request: assemble_request(&batch, &config, &specs),
        incomplete,
    })
}

fn run(cli: Cli) -> GlazingResult<()> {
    match cli.command {
        Command::Modules { category } => list_modules(category),
        Command::Requirements { module_id } => requirements(&module_id),
        Command::Cart { batch, config, unit } => {
            let outcome = build_cart(&batch, config.as_deref(), unit)?;
            print_json(&outcome.request)
        }
        Command::Quote { config } => {
            let config: QuoteConfiguration = read_json(&config)?;
            print_json(&to_quote_request(&config))
        }
        Command::Preview { response, original } => {
            let response: QuoteResponse = read_json(&response)?;
            let original: Option<QuoteConfiguration> = original.as_deref().map(read_json::<QuoteConfiguration>).transpose()?;
            print_json(&to_quote_preview(&response, original.as_ref()))
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
