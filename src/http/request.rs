//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Echo the ID on the response for client-side correlation
//! - Sanitise uploaded filenames before any filesystem use
//!
//! # Design Decisions
//! - An ID supplied by the client is kept, not replaced
//! - Filenames are reduced to a safe ASCII subset; path separators and
//!   parent references cannot survive sanitisation

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request, Response};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that assigns each request a UUID v4 request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let id = match request.headers().get(X_REQUEST_ID) {
            Some(existing) => existing.clone(),
            None => {
                let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                    .expect("UUID is a valid header value");
                request.headers_mut().insert(X_REQUEST_ID, generated.clone());
                generated
            }
        };

        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            response.headers_mut().entry(X_REQUEST_ID).or_insert(id);
            Ok(response)
        })
    }
}

/// Reduce an uploaded filename to a safe form.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; whitespace becomes `_`;
/// everything else (including path separators) is dropped. Leading dots
/// are stripped so the result can never be a hidden file or a parent
/// reference. An empty result falls back to `upload.pdf`.
pub fn sanitize_filename(name: &str) -> String {
    // Only the final path component matters.
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let mut out = String::with_capacity(base.len());
    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            out.push(ch);
        } else if ch.is_whitespace() {
            out.push('_');
        }
    }

    let trimmed = out.trim_start_matches('.').to_string();
    if trimmed.is_empty() {
        "upload.pdf".to_string()
    } else {
        trimmed
    }
}
