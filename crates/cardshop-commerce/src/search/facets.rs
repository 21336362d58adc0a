//! Facet counts for catalog navigation.

use crate::catalog::{Attribute, Catalog, Category};
use crate::search::CatalogQuery;
use serde::{Deserialize, Serialize};

/// Category and color counts over a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facets {
    pub categories: Facet,
    pub attributes: Facet,
}

impl Facets {
    /// Count entries per category and per attribute, marking the values the
    /// query currently selects. Values with no entries are omitted.
    pub fn compute(catalog: &Catalog, query: &CatalogQuery) -> Self {
        let mut categories = Facet::terms("Category", "category");
        for category in Category::ALL {
            let count = catalog.iter().filter(|e| e.category == category).count();
            if count > 0 {
                categories.add_value(category.as_str(), count, query.category == Some(category));
            }
        }

        let mut attributes = Facet::terms("Color", "attribute");
        for attribute in Attribute::ALL {
            let count = catalog.iter().filter(|e| e.attribute == attribute).count();
            if count > 0 {
                attributes.add_value(attribute.as_str(), count, query.attribute == Some(attribute));
            }
        }

        Self {
            categories,
            attributes,
        }
    }
}

/// A facet for filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Category").
    pub name: String,
    /// Field this facet filters on.
    pub field: String,
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Create a new terms facet.
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    /// Count for a value, zero if absent.
    pub fn count_of(&self, value: &str) -> usize {
        self.values
            .iter()
            .find(|v| v.value == value)
            .map(|v| v.count)
            .unwrap_or(0)
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    pub value: String,
    /// Number of entries with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}
