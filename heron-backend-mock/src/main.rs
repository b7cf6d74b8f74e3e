use heron_backend_mock::{router, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr =
        std::env::var("HERON_MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let app = router(Arc::new(AppState::seeded()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Heron mock backend listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
