//! Shopping cart module.
//!
//! Contains the stock-bounded cart and checkout receipts.

mod cart;
mod receipt;

pub use cart::{Cart, CartLine, Reconciliation};
pub use receipt::{Receipt, ReceiptLine};
