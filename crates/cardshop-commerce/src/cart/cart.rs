//! Cart and cart line types.
//!
//! Every mutation validates against a catalog snapshot and is
//! all-or-nothing: on error the cart is exactly as it was before the call.
//! After any successful call, each line's quantity is at least one and at
//! most the stock of its catalog entry.

use crate::cart::{Receipt, ReceiptLine};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::CardId;
use crate::price::Price;
use serde::{Deserialize, Serialize};

/// Purchase intent for one catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: CardId,
    /// Always at least one; a line at zero is removed.
    pub quantity: u32,
}

/// A shopping cart: lines in the order items were first added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of an item.
    ///
    /// Creates the line at quantity one, or increments an existing line.
    /// Returns the line's new quantity.
    ///
    /// Fails with:
    /// - `UnknownItem` if the id is not in the catalog
    /// - `OutOfStock` if the item has no stock
    /// - `StockExceeded` if the cart already holds every unit
    pub fn add(&mut self, catalog: &Catalog, item_id: &CardId) -> Result<u32, CommerceError> {
        let stock = catalog
            .stock_of(item_id)
            .ok_or_else(|| CommerceError::UnknownItem(item_id.clone()))?;
        if stock == 0 {
            return Err(CommerceError::OutOfStock(item_id.clone()));
        }

        if let Some(line) = self.line_mut(item_id) {
            if line.quantity >= stock {
                return Err(CommerceError::StockExceeded {
                    item_id: item_id.clone(),
                    stock,
                });
            }
            line.quantity += 1;
            tracing::debug!(item_id = %item_id, quantity = line.quantity, "cart line incremented");
            return Ok(line.quantity);
        }

        self.lines.push(CartLine {
            item_id: item_id.clone(),
            quantity: 1,
        });
        tracing::debug!(item_id = %item_id, "cart line created");
        Ok(1)
    }

    /// Add one unit to a line that is already in the cart.
    ///
    /// Unlike `add`, this never creates a line: an absent line fails with
    /// `UnknownItem`, as does a line whose item left the catalog.
    pub fn increase(&mut self, catalog: &Catalog, item_id: &CardId) -> Result<u32, CommerceError> {
        let stock = catalog.stock_of(item_id);
        let line = self
            .line_mut(item_id)
            .ok_or_else(|| CommerceError::UnknownItem(item_id.clone()))?;
        let stock = stock.ok_or_else(|| CommerceError::UnknownItem(item_id.clone()))?;

        if line.quantity >= stock {
            return Err(CommerceError::StockExceeded {
                item_id: item_id.clone(),
                stock,
            });
        }
        line.quantity += 1;
        tracing::debug!(item_id = %item_id, quantity = line.quantity, "cart line increased");
        Ok(line.quantity)
    }

    /// Remove one unit. A line that reaches zero is removed.
    ///
    /// Returns the remaining quantity; zero when the line is gone or was
    /// never there.
    pub fn decrease(&mut self, item_id: &CardId) -> u32 {
        let Some(index) = self.position(item_id) else {
            return 0;
        };

        let line = &mut self.lines[index];
        line.quantity = line.quantity.saturating_sub(1);
        let remaining = line.quantity;
        if remaining == 0 {
            self.lines.remove(index);
            tracing::debug!(item_id = %item_id, "cart line removed at zero");
        } else {
            tracing::debug!(item_id = %item_id, quantity = remaining, "cart line decreased");
        }
        remaining
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, item_id: &CardId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.item_id != item_id);
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::debug!(item_id = %item_id, "cart line removed");
        }
        removed
    }

    /// Clear all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Price the cart, empty it and return what was bought.
    pub fn checkout(&mut self, catalog: &Catalog) -> Result<Receipt, CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let lines = self
            .lines
            .iter()
            .map(|line| match catalog.get(&line.item_id) {
                Some(entry) => ReceiptLine::new(
                    line.item_id.clone(),
                    entry.name.clone(),
                    line.quantity,
                    entry.price,
                ),
                None => ReceiptLine::new(line.item_id.clone(), "", line.quantity, Price::zero()),
            })
            .collect();

        let receipt = Receipt::new(lines);
        self.lines.clear();
        tracing::info!(
            items = receipt.item_count,
            total = receipt.total.amount(),
            "checkout completed"
        );
        Ok(receipt)
    }

    /// Bring the cart in line with a new catalog.
    ///
    /// Lines whose item is gone or has no stock are removed; lines above the
    /// new stock are clamped to it.
    pub fn reconcile(&mut self, catalog: &Catalog) -> Reconciliation {
        let mut outcome = Reconciliation::default();

        self.lines.retain_mut(|line| match catalog.stock_of(&line.item_id) {
            None | Some(0) => {
                outcome.removed.push(line.item_id.clone());
                false
            }
            Some(stock) if line.quantity > stock => {
                line.quantity = stock;
                outcome.clamped.push(line.item_id.clone());
                true
            }
            Some(_) => true,
        });

        outcome
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price times quantity. Lines whose item is not in the catalog
    /// contribute nothing.
    pub fn total(&self, catalog: &Catalog) -> Price {
        self.lines
            .iter()
            .filter_map(|l| catalog.get(&l.item_id).map(|e| e.price.times(l.quantity)))
            .sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get a line by item id.
    pub fn get(&self, item_id: &CardId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.item_id == item_id)
    }

    /// Quantity held for an item, zero if absent.
    pub fn quantity_of(&self, item_id: &CardId) -> u32 {
        self.get(item_id).map(|l| l.quantity).unwrap_or(0)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, item_id: &CardId) -> Option<usize> {
        self.lines.iter().position(|l| &l.item_id == item_id)
    }

    fn line_mut(&mut self, item_id: &CardId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.item_id == item_id)
    }
}

/// Lines changed when a cart was reconciled against a new catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reconciliation {
    /// Items dropped because they left the catalog or ran out of stock.
    pub removed: Vec<CardId>,
    /// Items whose quantity was lowered to the new stock.
    pub clamped: Vec<CardId>,
}

impl Reconciliation {
    /// Check whether the cart was left untouched.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.clamped.is_empty()
    }

    /// Number of lines changed.
    pub fn adjusted(&self) -> usize {
        self.removed.len() + self.clamped.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Attribute, CatalogEntry, Category};
    use proptest::prelude::*;

    fn entry(id: &str, price: f64, stock: u32) -> CatalogEntry {
        CatalogEntry {
            id: CardId::new(id),
            name: format!("Card {}", id),
            category: Category::Instant,
            attribute: Attribute::Red,
            cost_symbol: "{R}".to_string(),
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
        vec![entry("bolt", 2000.0, 3), entry("opt", 500.0, 1), entry("empty", 900.0, 0)]
            .into_iter()
            .collect()
    }

    fn id(s: &str) -> CardId {
        CardId::new(s)
    }

    #[test]
    fn test_add_until_stock_exceeded() {
        let catalog = catalog();
        let mut cart = Cart::new();

        assert_eq!(cart.add(&catalog, &id("bolt")), Ok(1));
        assert_eq!(cart.add(&catalog, &id("bolt")), Ok(2));
        assert_eq!(cart.add(&catalog, &id("bolt")), Ok(3));
        assert_eq!(
            cart.add(&catalog, &id("bolt")),
            Err(CommerceError::StockExceeded { item_id: id("bolt"), stock: 3 })
        );
        assert_eq!(cart.quantity_of(&id("bolt")), 3);
    }

    #[test]
    fn test_add_rejects_unknown_and_out_of_stock() {
        let catalog = catalog();
        let mut cart = Cart::new();

        assert_eq!(cart.add(&catalog, &id("nope")), Err(CommerceError::UnknownItem(id("nope"))));
        assert_eq!(cart.add(&catalog, &id("empty")), Err(CommerceError::OutOfStock(id("empty"))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increase_requires_existing_line() {
        let catalog = catalog();
        let mut cart = Cart::new();

        assert_eq!(cart.increase(&catalog, &id("bolt")), Err(CommerceError::UnknownItem(id("bolt"))));
        cart.add(&catalog, &id("opt")).unwrap();
        assert_eq!(
            cart.increase(&catalog, &id("opt")),
            Err(CommerceError::StockExceeded { item_id: id("opt"), stock: 1 })
        );
    }

    #[test]
    fn test_decrease_to_zero_removes_line() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("bolt")).unwrap();

        assert_eq!(cart.decrease(&id("bolt")), 0);
        assert!(cart.get(&id("bolt")).is_none());
        assert_eq!(cart.increase(&catalog, &id("bolt")), Err(CommerceError::UnknownItem(id("bolt"))));
        assert_eq!(cart.decrease(&id("bolt")), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("bolt")).unwrap();
        cart.add(&catalog, &id("opt")).unwrap();

        assert!(cart.remove(&id("bolt")));
        let after_first = cart.clone();
        assert!(!cart.remove(&id("bolt")));
        assert_eq!(cart, after_first);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("opt")).unwrap();
        cart.add(&catalog, &id("bolt")).unwrap();
        cart.add(&catalog, &id("bolt")).unwrap();

        let order: Vec<&str> = cart.lines().iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(order, vec!["opt", "bolt"]);
    }

    #[test]
    fn test_checkout_empties_cart() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("bolt")).unwrap();
        cart.add(&catalog, &id("bolt")).unwrap();
        cart.add(&catalog, &id("opt")).unwrap();

        let receipt = cart.checkout(&catalog).unwrap();
        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.total, Price::new(4500.0));
        assert_eq!(receipt.lines[0].name, "Card bolt");

        assert!(cart.is_empty());
        assert!(cart.total(&catalog).is_zero());
        assert_eq!(cart.checkout(&catalog), Err(CommerceError::EmptyCart));
    }

    #[test]
    fn test_reconcile_clamps_and_drops() {
        let mut cart = Cart::new();
        let before = catalog();
        for _ in 0..3 {
            cart.add(&before, &id("bolt")).unwrap();
        }
        cart.add(&before, &id("opt")).unwrap();

        let after: Catalog = vec![entry("bolt", 2000.0, 2), entry("opt", 500.0, 0)]
            .into_iter()
            .collect();
        let outcome = cart.reconcile(&after);

        assert_eq!(outcome.clamped, vec![id("bolt")]);
        assert_eq!(outcome.removed, vec![id("opt")]);
        assert_eq!(outcome.adjusted(), 2);
        assert_eq!(cart.quantity_of(&id("bolt")), 2);
        assert!(cart.get(&id("opt")).is_none());
        assert!(cart.reconcile(&after).is_noop());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Increase(usize),
        Decrease(usize),
        Remove(usize),
        Clear,
        Checkout,
    }

    const IDS: [&str; 4] = ["bolt", "opt", "empty", "missing"];

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..IDS.len()).prop_map(Op::Add),
            3 => (0..IDS.len()).prop_map(Op::Increase),
            2 => (0..IDS.len()).prop_map(Op::Decrease),
            1 => (0..IDS.len()).prop_map(Op::Remove),
            1 => Just(Op::Clear),
            1 => Just(Op::Checkout),
        ]
    }

    proptest! {
        #[test]
        fn prop_stock_invariant_and_conservation(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let catalog = catalog();
            let mut cart = Cart::new();

            for op in ops {
                let before = cart.clone();
                let result = match op {
                    Op::Add(i) => cart.add(&catalog, &id(IDS[i])).map(|_| ()),
                    Op::Increase(i) => cart.increase(&catalog, &id(IDS[i])).map(|_| ()),
                    Op::Decrease(i) => {
                        cart.decrease(&id(IDS[i]));
                        Ok(())
                    }
                    Op::Remove(i) => {
                        cart.remove(&id(IDS[i]));
                        Ok(())
                    }
                    Op::Clear => {
                        cart.clear();
                        Ok(())
                    }
                    Op::Checkout => cart.checkout(&catalog).map(|_| ()),
                };

                if result.is_err() {
                    prop_assert_eq!(&cart, &before);
                }

                let mut expected_count = 0u64;
                let mut expected_total = 0.0f64;
                for line in cart.lines() {
                    let entry = catalog.get(&line.item_id).unwrap();
                    prop_assert!(line.quantity >= 1);
                    prop_assert!(line.quantity <= entry.stock_quantity);
                    expected_count += u64::from(line.quantity);
                    expected_total += entry.price.amount() * f64::from(line.quantity);
                }
                prop_assert_eq!(cart.item_count(), expected_count);
                prop_assert!((cart.total(&catalog).amount() - expected_total).abs() < 1e-6);
            }
        }
    }
}
