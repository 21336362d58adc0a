//! Catalog filters.

use crate::catalog::{Attribute, CatalogEntry, Category};
use serde::{Deserialize, Serialize};

/// A predicate over catalog entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Filter by category.
    Category(Category),
    /// Filter by primary color.
    Attribute(Attribute),
    /// Case-insensitive substring search in name, description, category
    /// and attribute labels. Blank text matches everything.
    Text(String),
    /// Only entries with stock.
    InStock,
}

impl Filter {
    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether an entry passes this filter.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Filter::Category(category) => entry.category == *category,
            Filter::Attribute(attribute) => entry.attribute == *attribute,
            Filter::InStock => entry.in_stock(),
            Filter::Text(query) => {
                let needle = query.trim().to_lowercase();
                if needle.is_empty() {
                    return true;
                }
                [
                    entry.name.as_str(),
                    entry.description.as_str(),
                    entry.category.as_str(),
                    entry.attribute.as_str(),
                ]
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
        }
    }
}
