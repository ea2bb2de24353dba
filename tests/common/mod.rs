//! Shared utilities for integration tests.

use std::net::SocketAddr;

use tokio::task::JoinHandle;
use zenpdf::compress::Ghostscript;
use zenpdf::config::AppConfig;
use zenpdf::HttpServer;

/// Config bound to loopback on an ephemeral port.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.listener.port = 0;
    config
}

/// Spawn a server with an explicit Ghostscript resolution.
///
/// Returns the bound address and the serve task handle.
pub async fn spawn_server(
    config: AppConfig,
    gs: Option<Ghostscript>,
) -> (SocketAddr, JoinHandle<()>) {
    let listener = zenpdf::net::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::with_ghostscript(config, gs);
    let handle = tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    (addr, handle)
}

/// A Ghostscript handle pointing at nothing, so the engine is "available"
/// but any run fails at spawn. Lets validation-ladder tests pass the
/// availability check without requiring Ghostscript on the test machine.
#[allow(dead_code)]
pub fn phantom_ghostscript() -> Ghostscript {
    Ghostscript::at("/nonexistent/ghostscript-for-tests")
}

/// A minimal but well-formed single-page PDF, with xref offsets computed
/// from the actual byte positions.
#[allow(dead_code)]
pub fn minimal_pdf() -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();
    let mut offsets = Vec::new();

    buf.extend_from_slice(b"%PDF-1.4\n");

    offsets.push(buf.len());
    buf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    offsets.push(buf.len());
    buf.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

    offsets.push(buf.len());
    buf.extend_from_slice(
        b"3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>\nendobj\n",
    );

    let xref_start = buf.len();
    buf.extend_from_slice(b"xref\n0 4\n0000000000 65535 f \n");
    for offset in &offsets {
        buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    buf.extend_from_slice(b"trailer\n<< /Size 4 /Root 1 0 R >>\nstartxref\n");
    buf.extend_from_slice(format!("{xref_start}\n").as_bytes());
    buf.extend_from_slice(b"%%EOF\n");

    buf
}
