//! The metadata lookup capability.

use std::time::Duration;

use async_trait::async_trait;
use cardshop_commerce::catalog::CardMetadata;
use cardshop_commerce::CardId;

/// Why a single row could not be resolved.
///
/// The assembler treats every variant the same way: the row is dropped and
/// the error recorded. The variants exist for reporting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no card matches '{0}'")]
    NotFound(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("resolved to {0}, which an earlier row already claimed")]
    Duplicate(CardId),
}

/// Resolves a card name to metadata with approximate matching.
///
/// Implementations should tolerate minor spelling and casing differences
/// and return the single best match.
#[async_trait]
pub trait CardLookup: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<CardMetadata, LookupError>;
}
