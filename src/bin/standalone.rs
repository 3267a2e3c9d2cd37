//! Standalone dashboard generator
//!
//! Writes one self-contained HTML file with the e-commerce, strategy and
//! roadmap reports.
//!
//! Run with: cargo run --bin strategic-standalone -- --workbook ./strategic_insight

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strategic_console::config::{Config, SourceKind};
use strategic_console::render::standalone::{self, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(name = "strategic-standalone", version, about = "Generate a standalone dashboard HTML file")]
struct Args {
    /// Workbook: a .xlsx file or a directory with one CSV per sheet
    #[arg(short, long)]
    workbook: Option<PathBuf>,

    /// Google Sheets credentials file (overrides the workbook)
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strategic_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    // Snapshots are generated once, nothing to cache
    config.source.cache_ttl_secs = 0;
    if let Some(path) = args.workbook {
        config.use_workbook(path);
    }
    if let Some(path) = args.credentials {
        config.source.credentials_file = Some(path);
        config.source.kind = SourceKind::Google;
    }

    let source = config.build_source()?;
    source
        .ping()
        .await
        .with_context(|| format!("sheet source '{}' is not reachable", source.name()))?;

    let html = standalone::generate(source.as_ref(), Local::now()).await;

    tokio::fs::write(&args.output, html)
        .await
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!(output = %args.output.display(), "Standalone dashboard generated");
    println!("Generated {}", args.output.display());
    Ok(())
}
