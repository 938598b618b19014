//! Bioforge CLI - run the design committee from the command line
//!
//! # Usage
//! ```bash
//! bioforge run --lat 32.0 --lng -145.0 --salinity 35.5 --contaminant PET --stress
//! bioforge run --reading sample.json --local --pretty
//! bioforge catalog
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bioforge_agent::{CommitteeOrchestrator, EngineConfig, EngineSettings};
use bioforge_core::{DesignCatalog, RawSampleReading};

/// Bioforge - bioremediation organism design committee
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Design an organism for one sample reading
    Run {
        /// Sample latitude in degrees
        #[arg(long, allow_hyphen_values = true, required_unless_present = "reading")]
        lat: Option<f64>,

        /// Sample longitude in degrees
        #[arg(long, allow_hyphen_values = true, required_unless_present = "reading")]
        lng: Option<f64>,

        /// Salinity in practical salinity units
        #[arg(long, required_unless_present = "reading")]
        salinity: Option<f64>,

        /// Contaminant class (PET, PE, PP, PS, PVC, PU)
        #[arg(long, required_unless_present = "reading")]
        contaminant: Option<String>,

        /// The sample site shows environmental stress
        #[arg(long)]
        stress: bool,

        /// Read the sample from a JSON file instead of flags
        #[arg(long, value_name = "FILE", conflicts_with_all = ["lat", "lng", "salinity", "contaminant"])]
        reading: Option<PathBuf>,

        /// Engine settings file (.toml or .json); defaults to BIOFORGE_* env vars
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Ignore any configured remote backend
        #[arg(long)]
        local: bool,

        /// Skip the pacing delay between phases
        #[arg(long)]
        no_delay: bool,

        /// Pretty-print the response envelope
        #[arg(long)]
        pretty: bool,
    },

    /// List the design catalog
    Catalog,
}

struct RunArgs {
    reading: RawSampleReading,
    config: Option<PathBuf>,
    local: bool,
    no_delay: bool,
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            lat,
            lng,
            salinity,
            contaminant,
            stress,
            reading,
            config,
            local,
            no_delay,
            pretty,
        } => {
            let reading = match reading {
                Some(path) => load_reading(&path)?,
                None => RawSampleReading {
                    lat: lat.context("--lat is required")?,
                    lng: lng.context("--lng is required")?,
                    salinity: salinity.context("--salinity is required")?,
                    contaminant: contaminant.context("--contaminant is required")?,
                    stress,
                },
            };
            run(RunArgs {
                reading,
                config,
                local,
                no_delay,
                pretty,
            })
            .await
        }
        Commands::Catalog => {
            print_catalog();
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log level used when `RUST_LOG` is unset
fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    // stdout carries the envelope; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn load_reading(path: &Path) -> anyhow::Result<RawSampleReading> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse sample file {}", path.display()))
}

async fn run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let settings = match &args.config {
        Some(path) => EngineSettings::from_file(path)?,
        None => EngineSettings::from_env()?,
    };

    let mut config = if args.local {
        EngineConfig::local()
            .with_phase_delay(std::time::Duration::from_millis(settings.phase_delay_ms))
    } else {
        EngineConfig::from_settings(&settings)?
    };
    if args.no_delay {
        config = config.without_delays();
    }

    let engine = CommitteeOrchestrator::new(config);
    tracing::debug!(mode = %engine.mode(), "engine configured");

    let envelope = match engine.run_reading(&args.reading).await {
        Ok(envelope) => envelope,
        Err(err) => {
            eprintln!("{} {}", "Invalid sample:".red().bold(), err);
            return Ok(ExitCode::from(2));
        }
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{}", json);

    if envelope.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_catalog() {
    println!();
    println!("{}", "BIOFORGE DESIGN CATALOG".bold());
    println!("─────────────────────────────────────────────────────────────────");
    for entry in DesignCatalog::entries() {
        println!(
            "{} {}",
            format!("{:<4}", entry.contaminant.code()).cyan().bold(),
            entry.contaminant.polymer_name()
        );
        println!("   ├─ Organism:  {}", entry.organism.italic());
        println!("   ├─ Enzyme:    {}", entry.enzyme.green());
        println!("   ├─ Mutations: {}", entry.mutations.join(", "));
        println!("   └─ Refs:      {}", entry.references.join("; ").dimmed());
        println!();
    }
}
