use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use walletd::application::WalletService;
use walletd::storage::LedgerConfig;

#[derive(Parser)]
#[command(name = "walletd", about, version)]
struct Cli {
    /// Path to the SQLite database file (created if missing)
    #[arg(long, default_value = "walletd.db")]
    database: String,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,

    /// Database connection pool size. The default of 1 serializes all
    /// storage access on a single session.
    #[arg(long, default_value_t = 1)]
    pool_size: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let database_url = format!("sqlite:{}?mode=rwc", cli.database);
    let config = LedgerConfig {
        max_connections: cli.pool_size,
    };
    let service = WalletService::init(&database_url, config).await?;

    let app = walletd::server::router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    info!(listen = %cli.listen, database = %cli.database, pool_size = cli.pool_size, "walletd listening");
    axum::serve(listener, app).await?;

    Ok(())
}
