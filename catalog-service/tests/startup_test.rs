use catalog_service::config::CatalogConfig;
use catalog_service::services::CatalogError;
use catalog_service::startup::Application;
use std::io::Write;
use std::net::TcpListener;
use tempfile::NamedTempFile;

/// A port that was free a moment ago.
fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn config_for(path: &std::path::Path, port: u16) -> CatalogConfig {
    let mut config = CatalogConfig::with_catalog_path(path);
    config.common.host = "127.0.0.1".to_string();
    config.common.port = port;
    config
}

#[tokio::test]
async fn missing_catalog_aborts_before_binding() {
    let dir = tempfile::tempdir().unwrap();
    let port = free_port();

    let result = Application::build(config_for(&dir.path().join("catalog.json"), port)).await;

    let err = result.err().expect("build should fail without a catalog");
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::Read { .. })
    ));
    // Nothing is listening on the configured port
    assert!(std::net::TcpStream::connect(("127.0.0.1", port)).is_err());
}

#[tokio::test]
async fn malformed_catalog_aborts_before_binding() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[{\"id\": \"a1\", ").unwrap();
    let port = free_port();

    let result = Application::build(config_for(file.path(), port)).await;

    let err = result.err().expect("build should fail on malformed JSON");
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::Parse { .. })
    ));
    assert!(std::net::TcpStream::connect(("127.0.0.1", port)).is_err());
}

#[tokio::test]
async fn non_object_record_aborts_startup() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"[{"id":"a1"}, "a2"]"#).unwrap();
    let port = free_port();

    let result = Application::build(config_for(file.path(), port)).await;

    let err = result.err().expect("build should fail on a non-object record");
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::Parse { .. })
    ));
    assert!(std::net::TcpStream::connect(("127.0.0.1", port)).is_err());
}

#[tokio::test]
async fn odd_but_valid_records_do_not_block_startup() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"[{"id": 7, "name": "Numeric"}, {"id": "a", "id": "b"}, {"name": "Orphan"}]"#)
        .unwrap();

    let app = Application::build(config_for(file.path(), 0))
        .await
        .expect("valid JSON must load");

    assert_eq!(app.catalog().len(), 3);
    assert!(app.catalog().find("7").is_none());
    assert!(app.catalog().find("b").is_some());
}

#[tokio::test]
async fn valid_catalog_binds_an_ephemeral_port() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"[{"id":"a1","name":"Widget"}]"#).unwrap();

    let app = Application::build(config_for(file.path(), 0))
        .await
        .expect("Failed to build application");

    assert_ne!(app.port(), 0);
    assert_eq!(app.catalog().len(), 1);
    assert!(app.catalog().find("a1").is_some());
}
