//! Launch-contract tests: port resolution, worker count, bind/release
//! behaviour.

use tokio::net::TcpStream;
use zenpdf::config::AppConfig;

mod common;

#[tokio::test]
async fn accepts_connections_on_the_bound_port() {
    let (addr, _server) = common::spawn_server(common::test_config(), None).await;

    TcpStream::connect(addr).await.unwrap();
}

#[tokio::test]
async fn binds_the_exact_configured_port() {
    // Grab a free port, release it, then require the launcher to take it.
    let probe = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = probe.local_addr().unwrap().port();
    drop(probe);

    let mut config = common::test_config();
    config.listener.port = port;
    let (addr, _server) = common::spawn_server(config, None).await;

    assert_eq!(addr.port(), port);
    TcpStream::connect(addr).await.unwrap();
}

#[tokio::test]
async fn rebinding_after_shutdown_succeeds() {
    let (addr, server) = common::spawn_server(common::test_config(), None).await;
    let port = addr.port();

    server.abort();
    let _ = server.await;

    let mut config = common::test_config();
    config.listener.port = port;
    let (addr, _server) = common::spawn_server(config, None).await;
    assert_eq!(addr.port(), port);
}

#[test]
fn default_port_is_5000() {
    assert_eq!(AppConfig::default().listener.port, 5000);
}

#[test]
fn default_worker_count_is_four() {
    assert_eq!(AppConfig::default().listener.workers, 4);
}

#[test]
fn launcher_runtime_gets_the_configured_workers() {
    let config = AppConfig::default();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.listener.workers)
        .enable_all()
        .build()
        .unwrap();

    assert_eq!(runtime.metrics().num_workers(), 4);
}
