//! HTTP endpoint handlers

use std::pin::Pin;
use std::task::{Context, Poll};

use crate::pipeline::FinishedDownload;
use crate::server::validate::validate_video_url;
use crate::server::AppState;
use crate::utils::error::VidmuxError;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use futures::Stream;
use serde::Deserialize;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

/// GET / - service description
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "vidmux API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "preview": "/preview?url={video_url}",
            "download": "/download?url={video_url}"
        }
    }))
}

/// GET /health - liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "vidmux"
    }))
}

/// GET /preview?url= - metadata without downloading
pub async fn preview(
    State(state): State<AppState>,
    Query(params): Query<UrlQuery>,
) -> Result<Json<serde_json::Value>, VidmuxError> {
    validate_video_url(&params.url)?;

    let video_info = state.info_service.fetch(&params.url).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": video_info,
    })))
}

/// GET /download?url= - run the full pipeline and stream the merged file
pub async fn download(
    State(state): State<AppState>,
    Query(params): Query<UrlQuery>,
) -> Result<Response, VidmuxError> {
    validate_video_url(&params.url)?;

    // Gate long-running jobs so previews and health checks stay responsive
    let _permit = state
        .job_slots
        .acquire()
        .await
        .map_err(|e| VidmuxError::Io(std::io::Error::other(e)))?;

    let finished = state.pipeline.run(&params.url).await?;

    if finished.size > state.settings.max_file_size {
        let size = finished.size;
        finished.cleanup().await;
        return Err(VidmuxError::FileTooLarge {
            size,
            limit: state.settings.max_file_size,
        });
    }

    let file = match File::open(&finished.output_path).await {
        Ok(file) => file,
        Err(_) => {
            finished.cleanup().await;
            return Err(VidmuxError::NotFound);
        }
    };

    info!(
        "Streaming {} ({} bytes) as {:?}",
        finished.output_path.display(),
        finished.size,
        finished.filename
    );

    let headers = [
        (header::CONTENT_TYPE, "video/mp4".to_string()),
        (header::CONTENT_LENGTH, finished.size.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", finished.filename),
        ),
    ];

    let body = Body::from_stream(DownloadBody::new(file, finished));
    Ok((headers, body).into_response())
}

/// Response body that owns the finished download
///
/// The scratch directory lives exactly as long as this stream: when axum
/// drops the body (transmission complete or client gone), the download drops
/// with it and the scratch directory is reclaimed.
struct DownloadBody {
    inner: ReaderStream<File>,
    _download: FinishedDownload,
}

impl DownloadBody {
    fn new(file: File, download: FinishedDownload) -> Self {
        Self {
            inner: ReaderStream::new(file),
            _download: download,
        }
    }
}

impl Stream for DownloadBody {
    type Item = std::io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}
