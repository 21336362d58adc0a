//! Card catalog module.
//!
//! Contains inventory rows, remote card metadata, classification and the
//! merged catalog.

mod catalog;
mod classify;
mod entry;
mod inventory;
mod metadata;

pub use catalog::Catalog;
pub use classify::{
    attribute_from_colors, classify_type_line, rarity_label, ATTRIBUTE_SYMBOLS,
    CATEGORY_PRECEDENCE,
};
pub use entry::{Attribute, CatalogEntry, Category};
pub use inventory::{parse_inventory, InventoryRow, REQUIRED_COLUMNS};
pub use metadata::CardMetadata;
