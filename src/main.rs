//! Strategic Console server
//!
//! Run with: cargo run --bin strategic-console
//!
//! Configuration comes from `config.toml` (see `--print-config`) with
//! `STRATEGIC_*` environment overrides; a `.env` file is read first.
//! Setting `GOOGLE_SHEETS_CREDENTIALS` reads sheets from Google Sheets
//! instead of the local workbook.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strategic_console::api::{serve, ApiConfig, AppState};
use strategic_console::config::{generate_default_config, Config, LoggingConfig};

#[derive(Parser, Debug)]
#[command(name = "strategic-console", version, about = "Strategy dashboard web server")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Workbook: a .xlsx file or a directory with one CSV per sheet
    #[arg(short, long)]
    workbook: Option<PathBuf>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(path) = args.workbook {
        config.use_workbook(path);
    }

    init_tracing(&config.logging);

    tracing::info!("Starting Strategic Console v{}", env!("CARGO_PKG_VERSION"));

    let source = config.build_source()?;
    match source.ping().await {
        Ok(()) => tracing::info!(source = source.name(), "Sheet source ready"),
        Err(e) => tracing::warn!(source = source.name(), error = %e, "Sheet source not reachable, pages will be empty"),
    }

    let api_config = ApiConfig::from(&config.server);
    serve(AppState::new(source, api_config.clone()), &api_config).await?;

    tracing::info!("Strategic Console stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("strategic_console={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
