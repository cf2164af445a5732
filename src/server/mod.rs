//! HTTP serving layer
//!
//! A thin axum adapter over the core: URL validation, the preview and
//! download endpoints, size enforcement and error-to-status mapping. All
//! pipeline contracts hold independently of this layer.

pub mod handlers;
pub mod validate;

use std::sync::Arc;

use crate::info::VideoInfoService;
use crate::pipeline::DownloadPipeline;
use crate::utils::config::AppSettings;
use crate::utils::error::VidmuxError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::Semaphore;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub settings: AppSettings,
    pub info_service: Arc<VideoInfoService>,
    pub pipeline: Arc<DownloadPipeline>,
    /// Bounds concurrently running download jobs; previews are not gated
    pub job_slots: Arc<Semaphore>,
}

impl AppState {
    pub fn new(
        settings: AppSettings,
        info_service: VideoInfoService,
        pipeline: DownloadPipeline,
    ) -> Self {
        let job_slots = Arc::new(Semaphore::new(settings.max_concurrent_jobs));
        Self {
            settings,
            info_service: Arc::new(info_service),
            pipeline: Arc::new(pipeline),
            job_slots,
        }
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/preview", get(handlers::preview))
        .route("/download", get(handlers::download))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn run(state: AppState) -> anyhow::Result<()> {
    let addr = state.settings.bind_addr;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

impl IntoResponse for VidmuxError {
    /// Map errors to HTTP statuses with stable codes
    ///
    /// External-tool diagnostics stay in the server log; clients only see
    /// the code and a short message.
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            VidmuxError::InvalidUrl => (
                StatusCode::BAD_REQUEST,
                "invalid_url",
                "Invalid or unsupported video URL",
            ),
            VidmuxError::MetadataUnavailable(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "metadata_unavailable",
                "Failed to get video information",
            ),
            VidmuxError::StreamNotFound(_) | VidmuxError::StreamEmpty(_) => (
                StatusCode::BAD_GATEWAY,
                "stream_unavailable",
                "Failed to download media streams",
            ),
            VidmuxError::ExtractionError(_) => (
                StatusCode::BAD_GATEWAY,
                "extraction_failed",
                "Failed to download media streams",
            ),
            VidmuxError::MergeFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "merge_failed",
                "Failed to merge video and audio",
            ),
            VidmuxError::FileTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "file_too_large",
                "Merged file exceeds the size limit",
            ),
            VidmuxError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Output file is no longer available",
            ),
            VidmuxError::ToolNotFound(_) | VidmuxError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Something went wrong on our end",
            ),
        };

        error!("Request failed ({}): {}", code, self);

        let body = Json(serde_json::json!({
            "success": false,
            "error": code,
            "message": message,
        }));
        (status, body).into_response()
    }
}
