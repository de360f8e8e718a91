//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{ErrorResponse, GenerateRequest, GenerateResponse};
use super::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Fixed client-visible failure message; real causes go to the logs only
const GENERATION_FAILED: &str = "Failed to generate content";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the SPA
        .route("/", get(serve_spa))
        // The one API route: prompt in, generated text out
        .route("/generate-content", post(generate_content))
        // Version
        .route("/version", get(get_version))
        // Static assets, with index.html fallback for client-side routes
        .fallback(get(serve_static))
        .with_state(state)
}

// ============================================================
// SPA Handler
// ============================================================

/// Serve the SPA index.html
async fn serve_spa() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI bundle not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Generation
// ============================================================

/// Forward one prompt to the hosted model and return the generated text
///
/// Stateless: no history is kept or forwarded, each request carries the
/// prompt alone. Every failure mode (malformed body, missing credential,
/// upstream error) maps to the same 500 contract.
async fn generate_content(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, AppError> {
    let request: GenerateRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "malformed generate-content request body");
        AppError::Generation
    })?;

    let Some(generator) = state.generator.as_ref() else {
        tracing::error!("no upstream credential configured, cannot generate");
        return Err(AppError::Generation);
    };

    match generator.generate(&request.prompt).await {
        Ok(text) => Ok(Json(GenerateResponse { response: text })),
        Err(e) => {
            tracing::error!(
                kind = e.kind.as_str(),
                error = %e.message,
                "Error generating content"
            );
            Err(AppError::Generation)
        }
    }
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("chat-relay ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Generation,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Generation => (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
