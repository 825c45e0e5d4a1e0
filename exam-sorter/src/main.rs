//! exam-sorter - batch classifier for scanned exam PDFs
//!
//! Walks a folder of unsorted scans, asks a language model for each exam's
//! course, year, semester, moed and degree, and files it into the archive
//! layout. Files that cannot be classified go to `not_a_pdf/` or
//! `not_a_test/` under the destination root.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use exam_common::config::{self, ClassifierConfig, Overrides};
use exam_sorter::{Classifier, Collaborators, CourseCatalog};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for exam-sorter
#[derive(Parser, Debug)]
#[command(name = "exam-sorter")]
#[command(about = "Classify scanned exam PDFs into a course archive")]
#[command(version)]
struct Args {
    /// Folder holding the unsorted scans
    #[arg(short, long, env = "EXAM_SORTER_SOURCE")]
    source: Option<PathBuf>,

    /// Root of the classified archive
    #[arg(short, long, env = "EXAM_SORTER_DESTINATION")]
    destination: Option<PathBuf>,

    /// JSON course catalog (degree → course names)
    #[arg(short, long, env = "EXAM_SORTER_CATALOG")]
    catalog: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay before each text/model call in milliseconds (0 disables)
    #[arg(long)]
    pacing_ms: Option<u64>,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level when RUST_LOG is not set (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config warnings are emitted before the final filter is known
    let config_path = config::resolve_config_path(args.config.as_deref());
    let toml_config = tracing::subscriber::with_default(
        tracing_subscriber::fmt().with_writer(std::io::stderr).finish(),
        || config::load_toml_config(config_path.as_deref()),
    )
    .context("Failed to load configuration")?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| toml_config.logging.level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting exam-sorter v{}", env!("CARGO_PKG_VERSION"));

    let overrides = Overrides {
        source_root: args.source,
        destination_root: args.destination,
        catalog_path: args.catalog,
        pacing_delay_ms: args.pacing_ms,
    };
    let classifier_config = ClassifierConfig::resolve(&toml_config, &overrides)
        .context("Incomplete configuration")?;
    classifier_config
        .validate()
        .context("Invalid configuration")?;

    let catalog = CourseCatalog::load(&classifier_config.catalog_path)
        .context("Failed to load course catalog")?;

    let api_key = config::resolve_api_key(&toml_config).with_context(|| {
        format!(
            "No API key configured (set {} or [llm] api_key)",
            config::API_KEY_ENV_VAR
        )
    })?;
    let collaborators = Collaborators::production(&classifier_config, &toml_config.llm, api_key)
        .context("Failed to initialize completion client")?;

    let mut classifier = Classifier::new(classifier_config, catalog, collaborators);
    let summary = classifier.run().await.context("Classification aborted")?;

    if let Some(report_path) = args.report {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(&report_path, json)
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
        info!(report = %report_path.display(), "Run summary written");
    }

    Ok(())
}
