pub mod health;
pub mod items;

pub use health::{health_check, metrics, readiness_check};
pub use items::{get_item, get_item_card, get_item_qr};
