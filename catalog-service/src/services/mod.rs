pub mod cards;
pub mod catalog;
pub mod metrics;

pub use cards::{export_cards, item_url, png_data_uri, qr_png, render_card, ExportSummary};
pub use catalog::{Catalog, CatalogError};
pub use self::metrics::{get_metrics, init_metrics, record_catalog_size};
