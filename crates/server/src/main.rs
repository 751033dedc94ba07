use clap::Parser;
use linkshelf_server::config::ServerConfig;
use linkshelf_server::metadata::HttpMetadataFetcher;
use linkshelf_server::store::BookmarkStore;
use linkshelf_server::version::VERSION;
use linkshelf_server::web::{AppState, create_axum_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,
}

fn init_logging(log_dir: &str) -> WorkerGuard {
    // Log to a file: JSON format, daily rotation
    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, "server.log"));
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal.");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    // Logging needs log_dir, so config errors before this point go to stderr.
    let server_config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load server configuration: {e}");
            return Err(e.into());
        }
    };

    let _log_guard = init_logging(&server_config.log_dir);
    info!("Starting server, version: {}", VERSION);

    // --- Store Setup ---
    let store = if server_config.seed_sample_bookmarks {
        BookmarkStore::with_samples()
    } else {
        BookmarkStore::new()
    };
    info!(bookmark_count = store.len(), "Initialized in-memory bookmark store.");

    // --- Metadata Fetcher Setup ---
    let metadata_fetcher = HttpMetadataFetcher::from_config(&server_config).map_err(|e| {
        error!(error = %e, "Failed to build metadata HTTP client.");
        e
    })?;

    let app_state = AppState::new(
        store.into_shared(),
        Arc::new(metadata_fetcher),
        server_config.clone(),
    );

    // --- Axum HTTP Server Setup ---
    let addr: SocketAddr = server_config.listen_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, create_axum_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Box::new)?;

    info!("Server stopped.");
    Ok(())
}
