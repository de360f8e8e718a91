use chat_relay::api::{create_router, AppState};
use chat_relay::llm::{GeminiConfig, GeminiService, GenerateText, LoggingGenerator};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    // Upstream generation backend, injected into the relay state
    let config = GeminiConfig::from_env();
    let generator: Option<Arc<dyn GenerateText>> = match config.api_key.clone() {
        Some(api_key) => {
            let model = config.model();
            tracing::info!(model = model.api_name(), "Gemini backend initialized");
            let service = Arc::new(GeminiService::new(api_key, model));
            Some(Arc::new(LoggingGenerator::new(service, "gemini")))
        }
        None => {
            tracing::warn!(
                "GOOGLE_API_KEY not set; generation requests will fail until configured"
            );
            None
        }
    };

    let state = AppState::new(generator);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("chat-relay server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
