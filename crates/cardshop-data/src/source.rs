//! Reading the local inventory source.

use std::path::{Path, PathBuf};

use cardshop_commerce::catalog::{parse_inventory, InventoryRow};
use cardshop_commerce::InventoryError;

/// The inventory source could not be turned into rows.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("inventory source {} is unavailable: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    #[error("inventory source is invalid: {0}")]
    Invalid(#[from] InventoryError),
}

/// Read and parse the inventory file at `path`.
pub async fn load_inventory(path: impl AsRef<Path>) -> Result<Vec<InventoryRow>, SourceError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SourceError::Unavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let rows = parse_inventory(&text)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded inventory source");
    Ok(rows)
}
