use catalog_service::config::CatalogConfig;
use catalog_service::services::init_metrics;
use catalog_service::Application;
use dotenvy::dotenv;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = CatalogConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "catalog-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )?;

    // Must be installed before the catalog gauge is recorded
    init_metrics()?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
