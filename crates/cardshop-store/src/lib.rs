//! The shop command surface.
//!
//! [`Shop`] owns the catalog and the cart behind one lock and exposes the
//! operations a presentation layer needs: loading the catalog, browsing it
//! and driving the cart through checkout.

mod error;
mod shop;

pub use error::{ShopError, ShopResult};
pub use shop::{CartLineView, Shop, ShopState};
