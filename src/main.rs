//! zenpdf server binary.
//!
//! Resolution order for the listening port: `--port` flag, then the `PORT`
//! environment variable, then the config file, then the built-in 5000.
//! Worker threads follow the same chain via `--workers` / `WEB_CONCURRENCY`
//! (default 4).

use std::path::PathBuf;

use clap::Parser;

use zenpdf::config::{load_config, AppConfig};
use zenpdf::{net, observability, HttpServer};

#[derive(Parser)]
#[command(name = "zenpdf")]
#[command(about = "Ghostscript-backed PDF compression service", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listening port
    #[arg(long)]
    port: Option<u16>,

    /// Override the number of worker threads
    #[arg(long)]
    workers: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(workers) = cli.workers {
        config.listener.workers = workers;
    }

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        workers = config.listener.workers,
        max_upload_mb = config.limits.max_upload_mb,
        "zenpdf starting"
    );

    // The worker pool is fixed at launch: the runtime is built by hand so
    // the configured count maps directly onto runtime worker threads.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.listener.workers)
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = net::bind(&config.listener).await?;
    let server = HttpServer::new(config);
    server.run(listener).await?;

    Ok(())
}
