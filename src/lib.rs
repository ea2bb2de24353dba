//! zenpdf — Ghostscript-backed PDF compression service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                 ZENPDF SERVER                  │
//!                      │                                               │
//!   POST /compress     │  ┌─────────┐   ┌──────────┐   ┌────────────┐ │
//!   ───────────────────┼─▶│   net   │──▶│   http   │──▶│  compress  │ │
//!                      │  │listener │   │ handlers │   │   engine   │ │
//!                      │  └─────────┘   └──────────┘   └─────┬──────┘ │
//!                      │                                     │        │
//!                      │                                     ▼        │
//!   compressed PDF     │                              ┌────────────┐  │
//!   ◀──────────────────┼──────────────────────────────│ghostscript │  │
//!                      │                              │ subprocess │  │
//!                      │                              └────────────┘  │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐  │
//!                      │  │          Cross-Cutting Concerns          │  │
//!                      │  │  ┌────────┐ ┌────────────┐ ┌──────────┐ │  │
//!                      │  │  │ config │ │observability│ │lifecycle │ │  │
//!                      │  │  └────────┘ └────────────┘ └──────────┘ │  │
//!                      │  └─────────────────────────────────────────┘  │
//!                      └───────────────────────────────────────────────┘
//! ```
//!
//! The listening port comes from `PORT` (default 5000) and the worker
//! count from `WEB_CONCURRENCY` (default 4). Ghostscript is resolved once
//! at startup; its absence is not fatal, only `/compress` reports it.

// Core subsystems
pub mod compress;
pub mod config;
pub mod error;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
