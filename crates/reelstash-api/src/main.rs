use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reelstash_api::routes::build_router;
use reelstash_api::state::AppState;
use reelstash_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The assets root backs thumbnail storage and static serving.
    tokio::fs::create_dir_all(&config.assets_root)
        .await
        .context("Failed to create assets root")?;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let max_video_mb = config.max_video_size_bytes / 1024 / 1024;

    let state = AppState::from_config(config)?;
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind server address")?;

    tracing::info!(
        addr = %addr,
        bucket = %state.config.s3_bucket,
        delivery_mode = ?state.config.delivery_mode(),
        max_video_mb,
        ffmpeg_path = %state.config.ffmpeg_path,
        ffprobe_path = %state.config.ffprobe_path,
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Listen for Ctrl+C (SIGINT) and SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
