use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use shanyrak_core::{AuthConfig, Credentials};
use shanyrak_db::{Database, DatabaseConfig};
use shanyrak_server::routes;
use shanyrak_server::state::AppState;

/// Shanyrak listings API server.
#[derive(Parser, Debug)]
#[command(name = "shanyrak", version, about)]
struct Args {
    /// Address to bind
    #[arg(long, env = "SHANYRAK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "SHANYRAK_PORT", default_value_t = 8000)]
    port: u16,

    /// Do not apply pending migrations at startup
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shanyrak=info".parse()?))
        .with_target(false)
        .init();

    let args = Args::parse();

    let auth_config = AuthConfig::from_env()?;
    let credentials = Credentials::new(&auth_config);

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        db.migrate().await?;
    }

    let state = Arc::new(AppState::new(db, credentials));

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    tracing::info!(%addr, token_ttl_secs = auth_config.token_ttl.num_seconds(), "Starting server");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
