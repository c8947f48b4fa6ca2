//! Batch export of printable item cards.
//!
//! Writes `qrcodes/item_N.png` and `html/item_N.html` for every catalog item
//! into `EXPORT_DIR` (default `output`). Each QR code resolves to the item on
//! `PUBLIC_BASE_URL`.

use catalog_service::config::CatalogConfig;
use catalog_service::services::{export_cards, Catalog};
use dotenvy::dotenv;
use service_core::observability::init_tracing;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = CatalogConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    // No span export from a one-shot batch run
    init_tracing("catalog-export", &config.common.log_level, None)?;

    let out_dir = PathBuf::from(std::env::var("EXPORT_DIR").unwrap_or_else(|_| "output".to_string()));

    let catalog = Catalog::load(&config.catalog.path)?;
    let summary = export_cards(&catalog, &out_dir, &config.catalog.public_url)?;

    tracing::info!(
        out_dir = %out_dir.display(),
        written = summary.written,
        skipped = summary.skipped,
        "All cards exported"
    );

    Ok(())
}
