//! Search module.
//!
//! Contains catalog filters, sorting and facet counts.

mod facets;
mod filter;
mod query;

pub use facets::{Facet, FacetValue, Facets};
pub use filter::Filter;
pub use query::{CatalogQuery, SortOption};
