use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{ConfigOverrides, EngineConfig};
use core_types::{Pocket, WheelLayout, WheelVariant};
use engine::RouletteEngine;
use std::path::PathBuf;

mod display;

/// The main entry point for the spinstat command-line tool.
fn main() -> Result<()> {
    // Load RUST_LOG and SPINSTAT_* variables from a .env file if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let _log_guard = configuration::init_tracing(cli.log_dir.as_deref())?;

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args),
        Commands::Layout(args) => {
            display::print_layout(&WheelLayout::new(args.variant));
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Descriptive statistics for a sequence of roulette spins.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Also write logs to a daily rolling file in this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a list of spins and print the analysis snapshot.
    Analyze(AnalyzeArgs),
    /// Print the attribute table of a wheel.
    Layout(LayoutArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Spins, oldest first, separated by commas or whitespace (e.g. "0,32,15,00").
    #[arg(long, required_unless_present = "file")]
    spins: Option<String>,

    /// Read spins from a text file instead, in the same format.
    #[arg(long, conflicts_with = "spins")]
    file: Option<PathBuf>,

    /// Configuration file. Defaults to ./config.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the snapshot as JSON instead of tables.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[derive(Parser)]
struct LayoutArgs {
    /// Wheel variant ("european" or "american").
    #[arg(long, default_value = "european")]
    variant: WheelVariant,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Builds an engine from the layered configuration, records every spin and prints
/// the resulting snapshot.
fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => configuration::load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => configuration::load_config().context("Failed to load config.toml")?,
    };
    args.overrides.apply(&mut config);

    let input = match (&args.spins, &args.file) {
        (Some(spins), _) => spins.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read spins from {}", path.display()))?,
        (None, None) => String::new(),
    };
    let pockets = parse_spins(&input)?;

    let snapshot = run_session(config, &pockets)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*snapshot)?);
    } else {
        display::print_snapshot(&snapshot);
    }
    Ok(())
}

fn run_session(
    config: EngineConfig,
    pockets: &[Pocket],
) -> Result<std::sync::Arc<analytics::AnalysisSnapshot>> {
    let mut engine = RouletteEngine::new(config).context("Invalid engine configuration")?;
    engine
        .record_outcomes(pockets)
        .context("Spin list contains a number that is not on this wheel")?;
    tracing::info!(
        session_id = %engine.session_id(),
        spins = pockets.len(),
        "Recorded spins"
    );
    Ok(engine.get_snapshot())
}

/// Splits a spin list on commas and whitespace and parses each pocket.
fn parse_spins(input: &str) -> Result<Vec<Pocket>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<Pocket>()
                .with_context(|| format!("Could not parse spin '{}'", token))
        })
        .collect()
}
