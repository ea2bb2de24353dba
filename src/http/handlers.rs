//! HTTP handlers.
//!
//! `/health` is a bare liveness probe; `/compress` accepts a multipart
//! upload and returns the compressed PDF. The validation ladder and its
//! error strings are part of the public API contract and are exercised by
//! the integration tests.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};

use crate::compress::{EngineError, Quality};
use crate::error::{ApiError, ApiResult};
use crate::http::request::sanitize_filename;
use crate::http::response::pdf_attachment;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Liveness probe.
pub async fn health() -> &'static str {
    metrics::record_request("/health", 200, Instant::now());
    "OK"
}

/// Compress an uploaded PDF.
pub async fn compress(State(state): State<AppState>, multipart: Multipart) -> Response {
    let start = Instant::now();
    let response = match compress_inner(&state, multipart, start).await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(%error, "Compression request rejected");
            error.into_response()
        }
    };
    metrics::record_request("/compress", response.status().as_u16(), start);
    response
}

async fn compress_inner(
    state: &AppState,
    mut multipart: Multipart,
    start: Instant,
) -> ApiResult<Response> {
    let engine = state.engine.as_ref().ok_or(ApiError::GhostscriptUnavailable)?;

    let mut file: Option<(String, Bytes)> = None;
    let mut quality_raw: Option<String> = None;
    let mut target_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(malformed)?;
                if file.is_none() {
                    file = Some((filename, data));
                }
            }
            Some("quality") => quality_raw = Some(field.text().await.map_err(malformed)?),
            Some("targetSizeMB") => target_raw = Some(field.text().await.map_err(malformed)?),
            _ => {}
        }
    }

    let (filename, data) = file.ok_or_else(|| ApiError::bad_request("No file part"))?;
    if filename.is_empty() {
        return Err(ApiError::bad_request("No selected file"));
    }
    if !allowed_file(&filename) {
        return Err(ApiError::bad_request("Invalid file type; PDF required"));
    }
    if data.len() as u64 > state.config.limits.max_upload_bytes() {
        return Err(ApiError::bad_request(format!(
            "File too large. Max allowed {} MB",
            state.config.limits.max_upload_mb
        )));
    }

    let quality = Quality::parse(quality_raw.as_deref().unwrap_or("high"));
    let target_size_mb = match target_raw.as_deref() {
        Some(raw) if !raw.is_empty() => Some(
            raw.parse::<f64>()
                .map_err(|_| ApiError::bad_request("Invalid targetSizeMB"))?,
        ),
        _ => None,
    };

    let filename = sanitize_filename(&filename);
    let outcome = engine
        .compress(&filename, &data, quality, target_size_mb)
        .await
        .map_err(map_engine_error)?;

    tracing::info!(
        filename = %filename,
        original_size = outcome.original_size,
        compressed_size = outcome.compressed_size(),
        quality = %outcome.quality,
        dpi = outcome.dpi,
        "Compression complete"
    );
    metrics::record_compression(outcome.original_size, outcome.compressed_size(), start);

    Ok(pdf_attachment(&outcome, &filename))
}

/// Upload must carry a `.pdf` extension (case-insensitive).
fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn malformed(error: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::bad_request(format!("Malformed multipart body: {error}"))
}

fn map_engine_error(error: EngineError) -> ApiError {
    match error {
        EngineError::Exhausted(source) => ApiError::CompressionExhausted {
            details: source.to_string(),
        },
        other => ApiError::Compression {
            details: other.to_string(),
        },
    }
}
