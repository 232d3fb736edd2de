//! ExoSift - synthetic exoplanet-detection CLI
//!
//! The `exosift` command drives the synthetic analysis engine from the
//! terminal.
//!
//! ## Commands
//!
//! - `analyze`: Run one synthetic analysis for a target and sector
//! - `survey`: Analyze a batch of catalog targets and summarize the results
//! - `targets`: Browse a mission's mock target catalog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};

use exosift_core::{
    browse, generate_targets, AnalysisOverrides, DetectionGenerator, DetectionStore,
    GeneratorConfig, MemoryDetectionStore,
};
use exosift_domain::{DetectionRecord, Mission};

#[derive(Parser)]
#[command(name = "exosift")]
#[command(author = "ExoSift Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Synthetic exoplanet-detection toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one synthetic analysis for a target
    Analyze {
        /// Target identifier (bare catalog number or mission-prefixed id)
        target: String,

        /// Observation sector/campaign (>= 1)
        #[arg(short, long, default_value = "1")]
        sector: u32,

        /// Mission catalog used for bare ids
        #[arg(short, long, default_value = "tess")]
        mission: String,

        /// Force a classification (exoplanet, candidate, false-positive)
        #[arg(long)]
        status: Option<String>,

        /// Force a planet class (e.g. "gas-giant"); applies to exoplanets
        #[arg(long)]
        planet_type: Option<String>,

        /// Force a vetting class (e.g. "eclipsing-binary"); applies to
        /// false positives
        #[arg(long)]
        false_positive_type: Option<String>,

        /// Fixed RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated inference delay in milliseconds
        #[arg(long, default_value = "2000")]
        latency_ms: u64,

        /// Print the full record as pretty JSON instead of a summary
        #[arg(long)]
        emit_json: bool,
    },

    /// Analyze a batch of catalog targets and summarize the results
    Survey {
        /// Mission whose catalog to survey
        #[arg(short, long, default_value = "tess")]
        mission: String,

        /// Number of targets to analyze
        #[arg(short, long, default_value = "5")]
        count: usize,

        /// Fixed RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated inference delay per target, in milliseconds
        #[arg(long, default_value = "2000")]
        latency_ms: u64,

        /// Print the accumulated records as pretty JSON
        #[arg(long)]
        emit_json: bool,
    },

    /// Browse a mission's mock target catalog
    Targets {
        /// Mission whose catalog to browse
        #[arg(short, long, default_value = "tess")]
        mission: String,

        /// Case-insensitive substring filter on target ids
        #[arg(long)]
        search: Option<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Targets per page
        #[arg(long, default_value = "10")]
        per_page: usize,

        /// Size of the generated catalog
        #[arg(long, default_value = "100")]
        count: usize,

        /// Fixed RNG seed for reproducible catalogs
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    exosift_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Analyze {
            target,
            sector,
            mission,
            status,
            planet_type,
            false_positive_type,
            seed,
            latency_ms,
            emit_json,
        } => {
            let mission = parse_mission(&mission)?;
            let overrides = AnalysisOverrides {
                status: parse_opt(status.as_deref(), "status")?,
                planet_type: parse_opt(planet_type.as_deref(), "planet type")?,
                false_positive_type: parse_opt(false_positive_type.as_deref(), "vetting class")?,
            };
            cmd_analyze(
                &target, sector, mission, overrides, seed, latency_ms, emit_json,
            )
            .await
        }
        Commands::Survey {
            mission,
            count,
            seed,
            latency_ms,
            emit_json,
        } => {
            let mission = parse_mission(&mission)?;
            cmd_survey(mission, count, seed, latency_ms, emit_json).await
        }
        Commands::Targets {
            mission,
            search,
            page,
            per_page,
            count,
            seed,
        } => {
            let mission = parse_mission(&mission)?;
            cmd_targets(mission, search.as_deref(), page, per_page, count, seed)
        }
    }
}

fn parse_mission(raw: &str) -> Result<Mission> {
    raw.parse()
        .with_context(|| format!("Unsupported mission '{}'", raw))
}

/// Parse an optional CLI label into a domain enum.
fn parse_opt<T>(raw: Option<&str>, what: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(str::parse)
        .transpose()
        .with_context(|| format!("Failed to parse {}", what))
}

fn build_generator(mission: Mission, latency_ms: u64, seed: Option<u64>) -> DetectionGenerator {
    let config = GeneratorConfig::default()
        .with_mission(mission)
        .with_latency(Duration::from_millis(latency_ms));
    match seed {
        Some(seed) => DetectionGenerator::with_seed(config, seed),
        None => DetectionGenerator::new(config),
    }
}

/// Run one synthetic analysis for a target
async fn cmd_analyze(
    target: &str,
    sector: u32,
    mission: Mission,
    overrides: AnalysisOverrides,
    seed: Option<u64>,
    latency_ms: u64,
    emit_json: bool,
) -> Result<()> {
    let generator = build_generator(mission, latency_ms, seed);
    let record = generator
        .generate(target, sector, Some(overrides))
        .await
        .context("Analysis failed")?;

    if emit_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(())
}

/// Analyze a batch of catalog targets and summarize the results
async fn cmd_survey(
    mission: Mission,
    count: usize,
    seed: Option<u64>,
    latency_ms: u64,
    emit_json: bool,
) -> Result<()> {
    let catalog_seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaChaRng::seed_from_u64(catalog_seed);
    let targets = generate_targets(&mut rng, mission, count);

    let generator = build_generator(mission, latency_ms, seed);
    let store = Arc::new(MemoryDetectionStore::new());

    info!(mission = %mission, count, "surveying catalog targets");
    for entry in &targets {
        let sector = entry.window.unwrap_or(1);
        let record = generator
            .generate(&entry.id, sector, None)
            .await
            .with_context(|| format!("Analysis failed for {}", entry.id))?;
        store.insert(record).await?;
    }

    let records = store.list().await?;
    if emit_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!(
        "{:<16} {:>6}  {:>11}  {:<15} CLASS",
        "TARGET", "SECTOR", "PROBABILITY", "STATUS"
    );
    for record in &records {
        println!(
            "{:<16} {:>6}  {:>10.2}%  {:<15} {}",
            record.target_id,
            record.sector,
            record.probability * 100.0,
            record.status.to_string(),
            record_class(record),
        );
    }

    let summary = store.summary().await?;
    println!();
    println!(
        "Exoplanets: {}  Candidates: {}  False positives: {}  Total: {}",
        summary.exoplanets, summary.candidates, summary.false_positives, summary.total
    );
    Ok(())
}

/// Browse a mission's mock target catalog
fn cmd_targets(
    mission: Mission,
    search: Option<&str>,
    page: usize,
    per_page: usize,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = ChaChaRng::seed_from_u64(seed.unwrap_or_else(rand::random));
    let targets = generate_targets(&mut rng, mission, count);
    let result = browse(&targets, search, page, per_page);

    println!("{} mission catalog", mission.display_name());
    for entry in &result.items {
        match entry.window {
            Some(window) => println!(
                "  {:<16} {} {}",
                entry.id,
                mission.window_label(),
                window
            ),
            None => println!("  {:<16}", entry.id),
        }
    }
    println!(
        "Page {}/{} ({} matching targets)",
        result.page, result.total_pages, result.total
    );
    Ok(())
}

fn record_class(record: &DetectionRecord) -> String {
    if let Some(planet_type) = record.planet_type {
        planet_type.to_string()
    } else if let Some(fp_type) = record.false_positive_type {
        fp_type.to_string()
    } else {
        "-".to_string()
    }
}

fn print_record(record: &DetectionRecord) {
    println!("Target:          {}", record.key());
    println!(
        "Status:          {} (probability {:.2}%)",
        record.status,
        record.probability * 100.0
    );
    println!(
        "Class:           {}  (radius {:.2} Re)",
        record_class(record),
        record.planet_radius
    );
    println!(
        "Host star:       Teff {:.0} K, logg {:.2}, [Fe/H] {:+.2}, {:.2} Rsun, {:.2} Msun",
        record.stellar_parameters.teff,
        record.stellar_parameters.logg,
        record.stellar_parameters.feh,
        record.stellar_parameters.radius,
        record.stellar_parameters.mass
    );
    println!(
        "Position:        RA {:.4} deg, Dec {:+.4} deg, mag {:.2}",
        record.right_ascension, record.declination, record.magnitude
    );
    println!(
        "TCE:             period {:.2} d, duration {:.2} h, depth {:.3}%",
        record.tce.period,
        record.tce.duration,
        record.tce.depth * 100.0
    );
    println!(
        "Quality:         RUWE {:.2}, DVR {:.3} +/- {:.3} [{}]",
        record.gaia_ruwe, record.spoc_dvr.value, record.spoc_dvr.uncertainty, record.spoc_dvr.flag
    );
    println!(
        "Curves:          {} light-curve samples, {}+{} folded samples",
        record.light_curve.len(),
        record.phase_days.len(),
        record.phase_hours.len()
    );
    println!("Top feature:     {}", record.feature_importances[0].name);
    println!("Analyzed at:     {}", record.analyzed_at.to_rfc3339());
}
