//! Item lookup, plus QR code and printable card renderings of an item.

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

use crate::{
    models::Item,
    services::{item_url, png_data_uri, qr_png, render_card},
    startup::AppState,
};

/// `GET /api/items/:id`: the first catalog item whose id equals the path
/// segment, or 404 `{"error":"Item not found"}`.
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let item = find_item(&state, &item_id)?;
    Ok(Json(item.clone()))
}

/// `GET /api/items/:id/qr`: PNG QR code pointing at the item's lookup URL.
pub async fn get_item_qr(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Response, AppError> {
    find_item(&state, &item_id)?;

    let png = qr_png(&item_url(&state.public_url, &item_id))?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// `GET /api/items/:id/card`: HTML card with the item's fields and an
/// inline QR code.
pub async fn get_item_card(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let item = find_item(&state, &item_id)?;

    let url = item_url(&state.public_url, &item_id);
    let qr_src = png_data_uri(&qr_png(&url)?);
    Ok(Html(render_card(item, &url, &qr_src)?))
}

fn find_item<'a>(state: &'a AppState, item_id: &str) -> Result<&'a Item, AppError> {
    match state.catalog.find(item_id) {
        Some(item) => {
            tracing::debug!(item_id = %item_id, "Item found");
            Ok(item)
        }
        None => {
            tracing::debug!(item_id = %item_id, "Item not found");
            Err(AppError::NotFound(anyhow::anyhow!("Item not found")))
        }
    }
}
