//! Shop state behind a single lock.

use std::path::Path;

use cardshop_commerce::prelude::*;
use cardshop_data::{load_inventory, AssemblyReport, CardLookup, CatalogAssembler};
use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{ShopError, ShopResult};

/// The catalog and the cart, always read and written together.
#[derive(Debug, Clone, Default)]
pub struct ShopState {
    pub catalog: Catalog,
    pub cart: Cart,
}

/// A cart line joined with its catalog entry, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
    pub item_id: CardId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
    /// Units on hand for the item.
    pub stock: u32,
}

/// Commands over the shop's catalog and cart.
///
/// Cart commands and catalog replacement are serialized through one mutex.
/// Catalog assembly runs outside it; only installing the result locks.
#[derive(Debug, Default)]
pub struct Shop {
    state: Mutex<ShopState>,
}

impl Shop {
    /// Create a shop with an empty catalog and cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shop around existing state.
    pub fn with_state(catalog: Catalog, cart: Cart) -> Self {
        Self {
            state: Mutex::new(ShopState { catalog, cart }),
        }
    }

    // =========================================================================
    // Catalog loading
    // =========================================================================

    /// Read the inventory source, assemble a catalog and install it.
    ///
    /// A source that cannot be read leaves the current catalog in place.
    pub async fn load_catalog(
        &self,
        source: impl AsRef<Path>,
        lookup: &dyn CardLookup,
        assembler: &CatalogAssembler,
    ) -> ShopResult<AssemblyReport> {
        let rows = load_inventory(source).await?;
        self.load_rows(&rows, lookup, assembler).await
    }

    /// Assemble a catalog from already-parsed rows and install it.
    ///
    /// When rows were attempted and none resolved, the empty catalog is
    /// still installed and [`ShopError::EmptyCatalog`] is returned.
    pub async fn load_rows(
        &self,
        rows: &[InventoryRow],
        lookup: &dyn CardLookup,
        assembler: &CatalogAssembler,
    ) -> ShopResult<AssemblyReport> {
        let assembly = assembler.assemble(rows, lookup).await;
        self.replace_catalog(assembly.catalog);

        if assembly.report.all_failed() {
            return Err(ShopError::EmptyCatalog {
                attempted: assembly.report.attempted,
            });
        }
        Ok(assembly.report)
    }

    /// Swap in a new catalog and reconcile the cart against it.
    pub fn replace_catalog(&self, catalog: Catalog) -> Reconciliation {
        let mut state = self.state.lock();
        let reconciliation = state.cart.reconcile(&catalog);
        state.catalog = catalog;

        if !reconciliation.is_noop() {
            tracing::info!(
                removed = reconciliation.removed.len(),
                clamped = reconciliation.clamped.len(),
                "Cart adjusted to new catalog"
            );
        }
        reconciliation
    }

    // =========================================================================
    // Catalog queries
    // =========================================================================

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> Catalog {
        self.state.lock().catalog.clone()
    }

    /// Look an entry up by id or exact name (case-insensitive).
    pub fn find(&self, id_or_name: &str) -> Option<CatalogEntry> {
        self.state.lock().catalog.find(id_or_name).cloned()
    }

    pub fn filter_by_category(&self, category: Category) -> Vec<CatalogEntry> {
        self.query(&CatalogQuery::new().with_category(category))
    }

    pub fn filter_by_attribute(&self, attribute: Attribute) -> Vec<CatalogEntry> {
        self.query(&CatalogQuery::new().with_attribute(attribute))
    }

    /// Text search; blank text returns the whole catalog.
    pub fn search(&self, text: &str) -> Vec<CatalogEntry> {
        self.query(&CatalogQuery::new().with_text(text))
    }

    pub fn query(&self, query: &CatalogQuery) -> Vec<CatalogEntry> {
        let state = self.state.lock();
        query.run(&state.catalog).into_iter().cloned().collect()
    }

    /// Facet counts for a query.
    pub fn facets(&self, query: &CatalogQuery) -> Facets {
        Facets::compute(&self.state.lock().catalog, query)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of an item. Returns the new quantity.
    pub fn add_to_cart(&self, item_id: &CardId) -> ShopResult<u32> {
        let mut state = self.state.lock();
        let ShopState { catalog, cart } = &mut *state;
        Ok(cart.add(catalog, item_id)?)
    }

    /// Increase a line already in the cart by one.
    pub fn increase_quantity(&self, item_id: &CardId) -> ShopResult<u32> {
        let mut state = self.state.lock();
        let ShopState { catalog, cart } = &mut *state;
        Ok(cart.increase(catalog, item_id)?)
    }

    /// Decrease a line by one, removing it at zero. Returns the remaining quantity.
    pub fn decrease_quantity(&self, item_id: &CardId) -> u32 {
        self.state.lock().cart.decrease(item_id)
    }

    /// Remove a line. Returns whether one was present.
    pub fn remove_from_cart(&self, item_id: &CardId) -> bool {
        self.state.lock().cart.remove(item_id)
    }

    pub fn clear_cart(&self) {
        self.state.lock().cart.clear();
    }

    /// Check out the cart, emptying it.
    pub fn checkout(&self) -> ShopResult<Receipt> {
        let mut state = self.state.lock();
        let ShopState { catalog, cart } = &mut *state;
        Ok(cart.checkout(catalog)?)
    }

    pub fn cart_item_count(&self) -> u64 {
        self.state.lock().cart.item_count()
    }

    pub fn cart_total(&self) -> Price {
        let state = self.state.lock();
        state.cart.total(&state.catalog)
    }

    /// Cart lines joined with their catalog entries, in insertion order.
    pub fn cart_lines(&self) -> Vec<CartLineView> {
        let state = self.state.lock();
        state
            .cart
            .lines()
            .iter()
            .filter_map(|line| {
                let entry = state.catalog.get(&line.item_id)?;
                Some(CartLineView {
                    item_id: line.item_id.clone(),
                    name: entry.name.clone(),
                    quantity: line.quantity,
                    unit_price: entry.price,
                    line_total: entry.price.times(line.quantity),
                    stock: entry.stock_quantity,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cardshop_data::LookupError;
    use std::collections::HashMap;
    use std::time::Duration;

    struct FakeLookup {
        cards: HashMap<String, CardMetadata>,
    }

    impl FakeLookup {
        fn new(cards: &[(&str, &str, &str, &str)]) -> Self {
            let cards = cards
                .iter()
                .map(|(name, id, type_line, color)| {
                    let meta = CardMetadata {
                        id: CardId::new(*id),
                        name: name.to_string(),
                        type_line: type_line.to_string(),
                        colors: vec![color.to_string()],
                        rarity: "rare".to_string(),
                        ..Default::default()
                    };
                    (name.to_string(), meta)
                })
                .collect();
            Self { cards }
        }
    }

    #[async_trait]
    impl CardLookup for FakeLookup {
        async fn lookup(&self, name: &str) -> Result<CardMetadata, LookupError> {
            self.cards
                .get(name)
                .cloned()
                .ok_or_else(|| LookupError::NotFound(name.to_string()))
        }
    }

    fn lookup() -> FakeLookup {
        FakeLookup::new(&[
            ("Lightning Bolt", "bolt", "Instant", "R"),
            ("Llanowar Elves", "elves", "Creature — Elf Druid", "G"),
            ("Serra Angel", "angel", "Creature — Angel", "W"),
        ])
    }

    fn assembler() -> CatalogAssembler {
        CatalogAssembler::new().with_pacer(cardshop_data::RequestPacer::new(Duration::from_millis(1)))
    }

    async fn loaded_shop() -> Shop {
        let shop = Shop::new();
        let rows = vec![
            InventoryRow::new("Lightning Bolt", 2.0, 3),
            InventoryRow::new("Llanowar Elves", 0.25, 1),
            InventoryRow::new("Serra Angel", 1.0, 0),
        ];
        shop.load_rows(&rows, &lookup(), &assembler()).await.unwrap();
        shop
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_bolt_stock_limit() {
        let shop = loaded_shop().await;
        let bolt = CardId::new("bolt");

        assert_eq!(shop.add_to_cart(&bolt).unwrap(), 1);
        assert_eq!(shop.add_to_cart(&bolt).unwrap(), 2);
        assert_eq!(shop.add_to_cart(&bolt).unwrap(), 3);
        let err = shop.add_to_cart(&bolt).unwrap_err();
        assert!(matches!(
            err,
            ShopError::Commerce(CommerceError::StockExceeded { stock: 3, .. })
        ));

        assert_eq!(shop.cart_item_count(), 3);
        assert_eq!(shop.cart_total().rounded(), 6000);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_out_of_stock_and_unknown() {
        let shop = loaded_shop().await;

        let err = shop.add_to_cart(&CardId::new("angel")).unwrap_err();
        assert!(matches!(err, ShopError::Commerce(CommerceError::OutOfStock(_))));

        let err = shop.add_to_cart(&CardId::new("nope")).unwrap_err();
        assert!(matches!(err, ShopError::Commerce(CommerceError::UnknownItem(_))));
        assert_eq!(shop.cart_item_count(), 0);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_decrease_to_zero_then_increase_fails() {
        let shop = loaded_shop().await;
        let elves = CardId::new("elves");

        shop.add_to_cart(&elves).unwrap();
        assert_eq!(shop.decrease_quantity(&elves), 0);
        assert!(shop.cart_lines().is_empty());

        let err = shop.increase_quantity(&elves).unwrap_err();
        assert!(matches!(err, ShopError::Commerce(CommerceError::UnknownItem(_))));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_checkout_empties_cart() {
        let shop = loaded_shop().await;
        shop.add_to_cart(&CardId::new("bolt")).unwrap();
        shop.add_to_cart(&CardId::new("elves")).unwrap();

        let receipt = shop.checkout().unwrap();
        assert_eq!(receipt.item_count, 2);
        assert_eq!(receipt.total.rounded(), 2250);

        assert_eq!(shop.cart_total(), Price::zero());
        assert!(matches!(
            shop.checkout().unwrap_err(),
            ShopError::Commerce(CommerceError::EmptyCart)
        ));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_queries() {
        let shop = loaded_shop().await;

        assert_eq!(shop.filter_by_category(Category::Creature).len(), 2);
        assert_eq!(shop.filter_by_attribute(Attribute::Red).len(), 1);
        assert_eq!(shop.search("angel").len(), 1);
        assert_eq!(shop.search("   ").len(), 3);
        assert_eq!(shop.query(&CatalogQuery::new().in_stock()).len(), 2);
        assert_eq!(shop.find("lightning bolt").map(|e| e.id), Some(CardId::new("bolt")));

        let facets = shop.facets(&CatalogQuery::new());
        assert_eq!(facets.categories.count_of("creature"), 2);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_cart_lines_join_catalog() {
        let shop = loaded_shop().await;
        let bolt = CardId::new("bolt");
        shop.add_to_cart(&bolt).unwrap();
        shop.increase_quantity(&bolt).unwrap();

        let lines = shop.cart_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Lightning Bolt");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].line_total.rounded(), 4000);
        assert_eq!(lines[0].stock, 3);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_reload_clamps_cart() {
        let shop = loaded_shop().await;
        let bolt = CardId::new("bolt");
        let elves = CardId::new("elves");
        for _ in 0..3 {
            shop.add_to_cart(&bolt).unwrap();
        }
        shop.add_to_cart(&elves).unwrap();

        let rows = vec![
            InventoryRow::new("Lightning Bolt", 2.0, 1),
            InventoryRow::new("Llanowar Elves", 0.25, 0),
        ];
        shop.load_rows(&rows, &lookup(), &assembler()).await.unwrap();

        let lines = shop.cart_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item_id, bolt);
        assert_eq!(lines[0].quantity, 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_all_rows_failing_installs_empty_catalog() {
        let shop = loaded_shop().await;
        shop.add_to_cart(&CardId::new("bolt")).unwrap();

        let rows = vec![InventoryRow::new("Unknown Card", 1.0, 1)];
        let err = shop.load_rows(&rows, &lookup(), &assembler()).await.unwrap_err();

        assert!(matches!(err, ShopError::EmptyCatalog { attempted: 1 }));
        assert!(err.is_recoverable());
        assert!(shop.catalog().is_empty());
        assert_eq!(shop.cart_item_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_source_keeps_catalog() {
        let shop = Shop::with_state(Catalog::new(), Cart::new());
        let err = shop
            .load_catalog("/no/such/inventory.csv", &lookup(), &assembler())
            .await
            .unwrap_err();

        assert!(matches!(err, ShopError::Source(_)));
        assert!(!err.is_recoverable());
    }
}
