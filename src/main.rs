use anyhow::Context;
use tokio::net::TcpListener;

use partchat_backend::core::config::{AppPaths, Settings};
use partchat_backend::core::logging;
use partchat_backend::server::router::router;
use partchat_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = AppPaths::new();
    logging::init(&paths);

    let settings = Settings::from_env()?;
    let state = AppState::initialize(&settings);

    let bind_addr = format!("127.0.0.1:{}", settings.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app = router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
