//! Card shop domain types and logic.
//!
//! This crate provides the in-memory model behind the shop:
//!
//! - **Catalog**: inventory rows, remote card metadata, the merged catalog
//! - **Cart**: stock-bounded purchase intent, totals and checkout receipts
//! - **Search**: filters, sorting and facet counts over the catalog
//!
//! # Example
//!
//! ```rust,ignore
//! use cardshop_commerce::prelude::*;
//!
//! let row = InventoryRow::new("Lightning Bolt", 2.0, 3);
//! let entry = CatalogEntry::merge(&row, metadata, ExchangeRate::default());
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(entry)?;
//!
//! let mut cart = Cart::new();
//! cart.add(&catalog, &CardId::new("e3285e6b"))?;
//! println!("Total: {}", cart.total(&catalog));
//! ```

pub mod error;
pub mod ids;
pub mod price;

pub mod catalog;
pub mod cart;
pub mod search;

pub use error::{CommerceError, InventoryError};
pub use ids::CardId;
pub use price::{ExchangeRate, Price};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, InventoryError};
    pub use crate::ids::CardId;
    pub use crate::price::{ExchangeRate, Price};

    // Catalog
    pub use crate::catalog::{
        parse_inventory, Attribute, CardMetadata, Catalog, CatalogEntry, Category, InventoryRow,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, Receipt, ReceiptLine, Reconciliation};

    // Search
    pub use crate::search::{CatalogQuery, Facets, Filter, SortOption};
}
