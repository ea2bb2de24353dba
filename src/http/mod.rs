//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, filename sanitisation)
//!     → handlers.rs (validation ladder, engine dispatch)
//!     → response.rs (attachment + size headers)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{sanitize_filename, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
