//! HTTP API for dochat
//!
//! Exposes the answer engine over two endpoints:
//! `GET /health` and `POST /ask`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use dochat_core::Error;
use dochat_rag::AnswerEngine;

#[derive(Clone)]
struct AppState {
    engine: Arc<AnswerEngine>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    /// Prior interactions as `[question, answer]` pairs, oldest first.
    pub history: Vec<(String, String)>,
    pub sources: Vec<String>,
}

/// Build the application router around an answer engine.
pub fn router(engine: Arc<AnswerEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/health", get(health_handler))
        .route("/ask", post(ask_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve the API until the process exits.
///
/// Callers must have finished the index build before this point; the router
/// only ever sees a fully constructed engine.
pub async fn serve(addr: SocketAddr, engine: Arc<AnswerEngine>) -> std::io::Result<()> {
    let app = router(engine);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("dochat API listening on {}", addr);

    axum::serve(listener, app).await
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Response {
    match state.engine.answer(&request.question).await {
        Ok(answer) => {
            let history = answer
                .history
                .into_iter()
                .map(|i| (i.question, i.answer))
                .collect();
            let sources = answer.sources.into_iter().map(|s| s.source).collect();

            Json(AskResponse {
                answer: answer.answer,
                history,
                sources,
            })
            .into_response()
        }
        Err(Error::EmptyQuestion) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "question must not be empty" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to generate an answer" })),
            )
                .into_response()
        }
    }
}
