use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tollgate_core::AuthConfig;
use tollgate_server::routes;
use tollgate_server::state::AppState;

#[derive(Parser)]
#[command(name = "tollgate-server", version, about = "Token authentication demo server")]
struct Args {
    /// Interface to bind
    #[arg(long, env = "TOLLGATE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "TOLLGATE_PORT", default_value_t = 3000)]
    port: u16,

    /// Browser origin allowed to call the API with credentials
    #[arg(long, env = "TOLLGATE_CORS_ORIGIN", default_value = "http://localhost:5173")]
    cors_origin: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tollgate=info".parse()?))
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = AuthConfig::from_env()?;
    let roster = config.load_roster()?;
    let tokens = config.token_service()?;
    tracing::info!(users = roster.len(), "Roster loaded");

    let state = Arc::new(AppState { roster, tokens });

    let origin: HeaderValue = args
        .cors_origin
        .parse()
        .with_context(|| format!("invalid CORS origin '{}'", args.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Starting server on {addr} (Swagger UI at /api-docs)");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
