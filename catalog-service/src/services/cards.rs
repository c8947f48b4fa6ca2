//! QR codes and printable HTML cards for catalog items.
//!
//! Each card lists the item's fields and carries a QR code that resolves to
//! the item's lookup URL on this service.

use crate::models::Item;
use crate::services::Catalog;
use anyhow::{Context, Result};
use askama::Template;
use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, Luma};
use qrcode::{EcLevel, QrCode};
use serde_json::Value;
use std::io::Cursor;
use std::path::Path;

#[derive(Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    title: &'a str,
    url: &'a str,
    qr_src: &'a str,
    rows: Vec<CardRow>,
}

struct CardRow {
    key: String,
    value: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Public lookup URL for an item id, percent-encoding the path segment.
pub fn item_url(base_url: &str, id: &str) -> String {
    format!(
        "{}/api/items/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Generate a QR code for `data` as PNG bytes.
pub fn qr_png(data: &str) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data, EcLevel::M)?;
    let image = code.render::<Luma<u8>>().build();

    let dynamic_image = DynamicImage::ImageLuma8(image);
    let mut buffer = Cursor::new(Vec::new());
    dynamic_image.write_to(&mut buffer, image::ImageOutputFormat::Png)?;

    Ok(buffer.into_inner())
}

pub fn png_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(png)
    )
}

/// Render the HTML card for `item`. `qr_src` is used verbatim as the image
/// source, so it must be a trusted data URI or relative path.
pub fn render_card(item: &Item, url: &str, qr_src: &str) -> Result<String> {
    let rows = item
        .fields()
        .iter()
        .map(|(key, value)| CardRow {
            key: key.clone(),
            value: display_value(value),
        })
        .collect();

    let card = CardTemplate {
        title: card_title(item),
        url,
        qr_src,
        rows,
    };

    Ok(card.render()?)
}

/// Write `qrcodes/item_N.png` and `html/item_N.html` under `out_dir` for
/// every item, numbered by catalog position. Items without a string id have
/// no lookup URL and are skipped.
pub fn export_cards(catalog: &Catalog, out_dir: &Path, base_url: &str) -> Result<ExportSummary> {
    let qr_dir = out_dir.join("qrcodes");
    let html_dir = out_dir.join("html");
    for dir in [&qr_dir, &html_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut summary = ExportSummary::default();
    for (idx, item) in catalog.items().iter().enumerate() {
        let key = format!("item_{}", idx + 1);
        let Some(id) = item.id() else {
            tracing::warn!(key = %key, "Skipping item without a string id");
            summary.skipped += 1;
            continue;
        };

        let url = item_url(base_url, id);
        let qr_path = qr_dir.join(format!("{}.png", key));
        std::fs::write(&qr_path, qr_png(&url)?)
            .with_context(|| format!("failed to write {}", qr_path.display()))?;

        let html = render_card(item, &url, &format!("../qrcodes/{}.png", key))?;
        let html_path = html_dir.join(format!("{}.html", key));
        std::fs::write(&html_path, html)
            .with_context(|| format!("failed to write {}", html_path.display()))?;

        tracing::info!(key = %key, item_id = %id, "Card exported");
        summary.written += 1;
    }

    Ok(summary)
}

fn card_title(item: &Item) -> &str {
    item.get("name")
        .and_then(Value::as_str)
        .or_else(|| item.id())
        .unwrap_or("Item")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
