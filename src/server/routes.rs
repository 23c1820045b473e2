use crate::adaptation::{Adaptation, CultureAdapter};
use crate::utils::Result;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const DEFAULT_SPEAKER_CULTURE: &str = "China";
pub const DEFAULT_TARGET_LANG: &str = "en";

type SharedAdapter = Arc<CultureAdapter>;

#[derive(Debug, Clone, Deserialize)]
pub struct AdaptRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_speaker_culture")]
    pub speaker_culture: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

fn default_speaker_culture() -> String {
    DEFAULT_SPEAKER_CULTURE.to_string()
}

fn default_target_lang() -> String {
    DEFAULT_TARGET_LANG.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptResponse {
    #[serde(flatten)]
    pub adaptation: Adaptation,
    pub code: u16,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn adapt_handler(
    State(adapter): State<SharedAdapter>,
    Json(payload): Json<AdaptRequest>,
) -> Json<AdaptResponse> {
    let adaptation = adapter
        .adapt(
            payload.text.trim(),
            &payload.speaker_culture,
            &payload.target_lang,
        )
        .await;

    Json(AdaptResponse {
        adaptation,
        code: 200,
    })
}

pub fn router(adapter: CultureAdapter) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/culture_semantic_adapt", post(adapt_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(adapter))
}

pub async fn serve(adapter: CultureAdapter, bind_addr: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", bind_addr, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("HTTP server listening on http://{}", addr);
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  POST /culture_semantic_adapt - Adapt and translate an utterance");

    axum::serve(listener, router(adapter)).await?;
    Ok(())
}
