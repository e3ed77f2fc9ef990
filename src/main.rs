//! Farmland API entry point.

use std::net::{IpAddr, SocketAddr};

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use farmland_api::api::{self, AppState};
use farmland_api::config::{Config, StoreBackend};
use farmland_api::metrics;
use farmland_api::store;

/// Farmer/landowner accounts and land listings over MongoDB.
#[derive(Parser, Debug)]
#[command(name = "farmland-api")]
#[command(about = "HTTP backend for farmer/landowner accounts and land listings")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Run {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep data in memory instead of MongoDB.
        #[arg(long)]
        in_memory: bool,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Check that the configured database answers a ping.
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("farmland_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if args.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::Ping) => cmd_ping().await,
        Some(Command::Run { port, in_memory }) => cmd_run(port.or(args.port), in_memory).await,
        None => cmd_run(args.port, false).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("FARMLAND API - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Store Backend: {:?}", config.store_backend);
    if config.store_backend == StoreBackend::Mongo {
        println!(
            "  MongoDB URI: {}",
            config.redacted_mongo_uri().unwrap_or_default()
        );
    }
    println!("  Database: {}", config.mongo_database);
    println!("  Listen: {}:{}", config.host, config.port);
    println!("  CORS: {}", if config.cors_enabled { "Permissive" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Check that the database answers a ping.
async fn cmd_ping() -> anyhow::Result<()> {
    let config = Config::load_validated()?;
    let backend = store::connect(&config).await?;

    print!("Pinging {:?} store... ", config.store_backend);
    match backend.ping().await {
        Ok(()) => {
            println!("OK");
            Ok(())
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            Err(anyhow::anyhow!("Store ping failed"))
        }
    }
}

/// Serve the HTTP API until shutdown.
async fn cmd_run(port_override: Option<u16>, in_memory: bool) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if in_memory {
        config.store_backend = StoreBackend::Memory;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!("Store backend: {:?}", config.store_backend);
    info!("Database: {}", config.mongo_database);

    // Initialize metrics
    let metrics_handle = match metrics::init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            None
        }
    };

    // Open the store once; every request shares it
    let backend = store::connect(&config).await?;
    if let Err(e) = backend.ping().await {
        warn!("Store not reachable yet: {}", e);
    }

    let mut app_state = AppState::new(backend).with_cors(config.cors_enabled);
    if let Some(handle) = metrics_handle {
        app_state = app_state.with_metrics(handle);
    }

    let host: IpAddr = config.host.parse()?;
    let addr = SocketAddr::new(host, config.port);
    api::serve(addr, app_state).await?;

    Ok(())
}
