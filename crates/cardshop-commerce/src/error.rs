//! Commerce error types.

use thiserror::Error;

use crate::ids::CardId;

/// Errors raised by cart and catalog validation.
///
/// All of these are recoverable: the operation that produced one left the
/// cart and catalog untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Item is not in the catalog, or has no line in the cart.
    #[error("Unknown item: {0}")]
    UnknownItem(CardId),

    /// Item is in the catalog but has no stock at all.
    #[error("Out of stock: {0}")]
    OutOfStock(CardId),

    /// The cart already holds every unit in stock.
    #[error("Stock exceeded for {item_id}: {stock} in stock")]
    StockExceeded { item_id: CardId, stock: u32 },

    /// Checkout was requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Two catalog entries tried to claim the same id.
    #[error("Duplicate item: {0}")]
    DuplicateItem(CardId),
}

/// Errors from parsing a tabular inventory source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The source has no header row.
    #[error("Inventory source is empty")]
    MissingHeader,

    /// A required column is absent from the header row.
    #[error("Inventory header is missing required column '{0}'")]
    MissingColumn(&'static str),
}
