//! The assembled catalog.

use crate::catalog::CatalogEntry;
use crate::error::CommerceError;
use crate::ids::CardId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from card id to entry, iterated in assembly order.
///
/// A catalog is built once per sync and replaced wholesale; nothing mutates
/// an entry after it has been inserted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    entries: IndexMap<CardId, CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Ids are unique: a second entry with the same id is
    /// rejected and the first one kept.
    pub fn insert(&mut self, entry: CatalogEntry) -> Result<(), CommerceError> {
        if self.entries.contains_key(&entry.id) {
            return Err(CommerceError::DuplicateItem(entry.id));
        }
        self.entries.insert(entry.id.clone(), entry);
        Ok(())
    }

    /// Get an entry by id.
    pub fn get(&self, id: &CardId) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// Check whether an id is present.
    pub fn contains(&self, id: &CardId) -> bool {
        self.entries.contains_key(id)
    }

    /// Stock for an id, if it is in the catalog.
    pub fn stock_of(&self, id: &CardId) -> Option<u32> {
        self.entries.get(id).map(|e| e.stock_quantity)
    }

    /// Find an entry by exact id or case-insensitive name.
    pub fn find(&self, id_or_name: &str) -> Option<&CatalogEntry> {
        let needle = id_or_name.trim();
        self.entries.get(&CardId::new(needle)).or_else(|| {
            self.entries
                .values()
                .find(|e| e.name.eq_ignore_ascii_case(needle))
        })
    }

    /// Entries in assembly order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units on hand across all entries.
    pub fn total_stock(&self) -> u64 {
        self.entries.values().map(|e| u64::from(e.stock_quantity)).sum()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    /// Collect entries, keeping the first of any duplicate ids.
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for entry in iter {
            if let Err(e) = catalog.insert(entry) {
                tracing::debug!(error = %e, "dropping duplicate catalog entry");
            }
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = indexmap::map::Values<'a, CardId, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
