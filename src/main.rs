use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_catalog_api::{config, AppState};

#[derive(Debug, Parser)]
#[command(name = "game-catalog-api")]
#[command(about = "HTTP CRUD API for games, genres and platforms")]
#[command(version)]
struct Args {
    #[arg(long, help = "Bind host (overrides API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Bind port (overrides API_PORT / PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_* and SECRET_KEY
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let config = config::config();
    info!("Starting game catalog API in {:?} mode", config.environment);
    if !config.security.require_auth {
        info!("bearer-token gate disabled; write routes are open");
    }

    let state = AppState::from_config(config).context("building database connector")?;

    let mut app = game_catalog_api::app(state);
    if config.api.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let host = args.host.unwrap_or_else(|| config.api.host.clone());
    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("{}:{}", host, port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!(%bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "game_catalog_api=info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
