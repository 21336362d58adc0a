//! Catalog query builder.

use crate::catalog::{Attribute, Catalog, CatalogEntry, Category};
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Sort options for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Assembly order (default).
    #[default]
    Catalog,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Catalog => "catalog",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
        }
    }

    /// Parse a sort key; `-` and `_` are interchangeable.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "catalog" => Some(SortOption::Catalog),
            "name_asc" | "name" => Some(SortOption::NameAsc),
            "name_desc" => Some(SortOption::NameDesc),
            "price_asc" | "price" => Some(SortOption::PriceAsc),
            "price_desc" => Some(SortOption::PriceDesc),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Catalog => "Catalog order",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }

    fn sort(&self, entries: &mut [&CatalogEntry]) {
        match self {
            SortOption::Catalog => {}
            SortOption::NameAsc => entries.sort_by_key(|e| e.name.to_lowercase()),
            SortOption::NameDesc => {
                entries.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
            }
            SortOption::PriceAsc => {
                entries.sort_by(|a, b| a.price.amount().total_cmp(&b.price.amount()))
            }
            SortOption::PriceDesc => {
                entries.sort_by(|a, b| b.price.amount().total_cmp(&a.price.amount()))
            }
        }
    }
}

/// A catalog query: every set criterion must match.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogQuery {
    /// Free-text search.
    pub text: Option<String>,
    pub category: Option<Category>,
    pub attribute: Option<Attribute>,
    /// Hide entries without stock.
    pub in_stock_only: bool,
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Create a query that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank text is ignored.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.text = Some(text);
        }
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn in_stock(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// The filters this query applies.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(text) = &self.text {
            filters.push(Filter::Text(text.clone()));
        }
        if let Some(category) = self.category {
            filters.push(Filter::Category(category));
        }
        if let Some(attribute) = self.attribute {
            filters.push(Filter::Attribute(attribute));
        }
        if self.in_stock_only {
            filters.push(Filter::InStock);
        }
        filters
    }

    /// Run the query against a catalog.
    pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a CatalogEntry> {
        let filters = self.filters();
        let mut matches: Vec<&CatalogEntry> = catalog
            .iter()
            .filter(|entry| filters.iter().all(|f| f.matches(entry)))
            .collect();
        self.sort.sort(&mut matches);
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CardId;
    use crate::price::Price;

    fn entry(id: &str, name: &str, category: Category, attribute: Attribute, price: f64, stock: u32) -> CatalogEntry {
        CatalogEntry {
            id: CardId::new(id),
            name: name.to_string(),
            category,
            attribute,
            cost_symbol: String::new(),
            power: None,
            toughness: None,
            description: String::new(),
            price: Price::new(price),
            stock_quantity: stock,
            rarity_label: "Common".to_string(),
            edition_name: "Alpha".to_string(),
            image_ref: None,
            external_ref: None,
        }
    }

    fn catalog() -> Catalog {
        vec![
            entry("1", "Shock", Category::Instant, Attribute::Red, 300.0, 4),
            entry("2", "Counterspell", Category::Instant, Attribute::Blue, 1500.0, 0),
            entry("3", "Forest", Category::Land, Attribute::Colorless, 10.0, 40),
            entry("4", "Ball Lightning", Category::Creature, Attribute::Red, 800.0, 1),
        ]
        .into_iter()
        .collect()
    }

    fn names(entries: Vec<&CatalogEntry>) -> Vec<&str> {
        entries.into_iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_catalog_order() {
        let catalog = catalog();
        assert_eq!(
            names(CatalogQuery::new().run(&catalog)),
            vec!["Shock", "Counterspell", "Forest", "Ball Lightning"]
        );
    }

    #[test]
    fn test_combined_filters() {
        let catalog = catalog();
        let query = CatalogQuery::new()
            .with_category(Category::Instant)
            .with_attribute(Attribute::Red);
        assert_eq!(names(query.run(&catalog)), vec!["Shock"]);

        let query = CatalogQuery::new().with_category(Category::Instant).in_stock();
        assert_eq!(names(query.run(&catalog)), vec!["Shock"]);
    }

    #[test]
    fn test_sorting() {
        let catalog = catalog();
        let by_price = CatalogQuery::new().with_sort(SortOption::PriceDesc);
        assert_eq!(
            names(by_price.run(&catalog)),
            vec!["Counterspell", "Ball Lightning", "Shock", "Forest"]
        );

        let by_name = CatalogQuery::new().with_text("red").with_sort(SortOption::NameAsc);
        assert_eq!(names(by_name.run(&catalog)), vec!["Ball Lightning", "Shock"]);
    }

    #[test]
    fn test_sort_option_parsing() {
        assert_eq!(SortOption::from_str("PRICE_DESC"), Some(SortOption::PriceDesc));
        assert_eq!(SortOption::from_str("name"), Some(SortOption::NameAsc));
        assert_eq!(SortOption::from_str("rating"), None);
        assert_eq!(CatalogQuery::new().with_text("  ").text, None);
    }
}
