//! Command surface errors.

use cardshop_commerce::CommerceError;
use cardshop_data::SourceError;
use thiserror::Error;

/// Result type for shop commands.
pub type ShopResult<T> = Result<T, ShopError>;

#[derive(Error, Debug)]
pub enum ShopError {
    /// The inventory source could not be read; the previous catalog is kept.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Every attempted row failed to resolve. The empty catalog is installed.
    #[error("None of the {attempted} inventory rows could be resolved")]
    EmptyCatalog { attempted: usize },

    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl ShopError {
    /// Check if the error leaves the shop usable (everything but a source failure).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ShopError::Source(_))
    }
}
