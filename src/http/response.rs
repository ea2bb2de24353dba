//! Response construction for compressed PDFs.
//!
//! # Responsibilities
//! - Serve the compressed bytes as a named attachment
//! - Report sizes, ratio and quality through `X-*` headers

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

use crate::compress::CompressionOutcome;

pub const X_ORIGINAL_SIZE: &str = "x-original-size";
pub const X_COMPRESSED_SIZE: &str = "x-compressed-size";
pub const X_COMPRESSION_RATIO: &str = "x-compression-ratio";
pub const X_QUALITY_USED: &str = "x-quality-used";
pub const X_TARGET_SIZE: &str = "x-target-size";

/// Build the success response for a compression request.
///
/// `filename` must already be sanitised; it is embedded verbatim in the
/// `Content-Disposition` header.
pub fn pdf_attachment(outcome: &CompressionOutcome, filename: &str) -> Response {
    let disposition = format!("attachment; filename=\"compressed_{filename}\"");

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(X_ORIGINAL_SIZE, outcome.original_size)
        .header(X_COMPRESSED_SIZE, outcome.compressed_size())
        .header(X_COMPRESSION_RATIO, format!("{:.4}", outcome.ratio()))
        .header(X_QUALITY_USED, outcome.quality.as_str());

    if let Some(target) = outcome.target_size_mb {
        if let Ok(value) = HeaderValue::from_str(&target.to_string()) {
            builder = builder.header(X_TARGET_SIZE, value);
        }
    }

    builder
        .body(Body::from(outcome.data.clone()))
        .expect("static headers are valid")
}
