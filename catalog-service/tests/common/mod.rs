use catalog_service::config::CatalogConfig;
use catalog_service::startup::Application;
use std::io::Write;
use tempfile::NamedTempFile;

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    // Held so the catalog file outlives the server
    _catalog_file: NamedTempFile,
}

#[allow(dead_code)]
impl TestApp {
    /// Serve `catalog_json` on a random local port.
    pub async fn spawn(catalog_json: &str) -> Self {
        let mut file = NamedTempFile::new().expect("Failed to create catalog file");
        file.write_all(catalog_json.as_bytes())
            .expect("Failed to write catalog file");

        let mut config = CatalogConfig::with_catalog_path(file.path());
        config.common.host = "127.0.0.1".to_string();
        config.common.port = 0; // Random port for testing

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            _catalog_file: file,
        }
    }

    pub async fn get_item(&self, id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/api/items/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
