//! Cardio: heart-disease risk inference over HTTP and the command line.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file, loads the pre-fit classifier and scaler
//! artifacts, and either starts the Axum server (`serve`) or runs a one-shot
//! prediction (`predict`).

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardio::artifacts::Artifacts;
use cardio::cli;
use cardio::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use cardio::routes::create_router;
use cardio::state::AppState;

/// Cardio: serve a pre-trained heart-disease risk classifier
#[derive(Parser, Debug)]
#[command(name = "cardio", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "cardio=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Score one feature vector and print JSON to stdout
    Predict {
        /// JSON array of all 12 feature values in canonical order
        values: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration before tracing init so the log format is honored
    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Predict { values } => cli::run_predict(&config, &values),
        Command::Serve => match serve(config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "Server failed");
                ExitCode::FAILURE
            }
        },
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        model_path = %config.artifacts.model_path,
        scaler_path = %config.artifacts.scaler_path,
        "Loading artifacts"
    );

    // Degraded startup: load failures leave untrained stand-ins in place so
    // the process still starts; /health exposes the flags.
    let artifacts = Artifacts::load_or_untrained(&config.artifacts);
    if artifacts.model_loaded && artifacts.scaler_loaded {
        tracing::info!("Model and scaler loaded");
    }

    // Create application state and router
    let state = AppState::new(config.clone(), &artifacts);
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
