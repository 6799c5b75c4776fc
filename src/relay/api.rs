use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::Method,
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::detector::{Detection, ExpressionClassifier};
use crate::relay::config::RelayConfig;
use crate::relay::error::RelayError;

#[derive(Clone)]
pub struct RelayState {
    pub classifier: Arc<ExpressionClassifier>,
    pub config: Arc<RelayConfig>,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Self {
        let classifier = ExpressionClassifier::new(config.classifier_config());
        Self {
            classifier: Arc::new(classifier),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: RelayState) -> Router {
    // The UI is served from another origin, so the relay stays permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(banner))
        .route("/api/mood-detect", post(mood_detect))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct BannerResponse {
    status: &'static str,
    version: &'static str,
}

async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        status: "Mood detection backend running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Accept one camera snapshot, run it through the classifier, and relay the
/// verdict. The upload only ever touches disk as the classifier's staged
/// temp file, which is removed on every path.
async fn mood_detect(
    State(state): State<RelayState>,
    mut multipart: Multipart,
) -> Result<Json<Detection>, RelayError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| RelayError::BadUpload(err.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let data = field
                .bytes()
                .await
                .map_err(|err| RelayError::BadUpload(err.to_string()))?;

            // Reject garbage before spawning the classifier process.
            if image::guess_format(&data).is_err() {
                return Err(RelayError::NotAnImage);
            }

            let detection = state
                .classifier
                .classify_bytes(&data, &state.config.upload_dir)
                .await?;

            info!(
                "Detected mood '{}' from a {} byte upload",
                detection.detected_mood.as_str(),
                data.len()
            );

            return Ok(Json(detection));
        }
    }

    Err(RelayError::MissingFile)
}

pub async fn serve(state: RelayState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!("Relay listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
