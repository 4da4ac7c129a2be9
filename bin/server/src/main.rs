use langbuddy_server::{config::ServerConfig, routes, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let state = AppState::from_config(&config);
    if let Some(reason) = state.unavailable_reason() {
        tracing::warn!(%reason, "Language tools are unavailable; tool routes will return errors");
    }

    let audio_dir = config.audio_dir();
    tokio::fs::create_dir_all(&audio_dir)
        .await
        .expect("failed to create audio directory");
    tracing::debug!(audio_dir = %audio_dir.display(), "Audio directory ready");

    let app = routes::router(state, &config.server.static_dir);

    let addr = config.server.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
