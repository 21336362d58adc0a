//! Checkout receipts.

use crate::ids::CardId;
use crate::price::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a checkout "bought". No payment is taken; the receipt only records
/// the cart contents at the moment it was emptied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of line totals.
    pub total: Price,
    pub completed_at: DateTime<Utc>,
}

impl Receipt {
    /// Build a receipt from priced lines.
    pub fn new(lines: Vec<ReceiptLine>) -> Self {
        let item_count: u64 = lines.iter().map(|l| u64::from(l.quantity)).sum();
        let total: Price = lines.iter().map(|l| l.line_total).sum();
        Self {
            lines,
            item_count,
            total,
            completed_at: Utc::now(),
        }
    }
}

/// One priced line of a receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptLine {
    pub item_id: CardId,
    /// Card name (denormalized for display).
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    /// Unit price times quantity.
    pub line_total: Price,
}

impl ReceiptLine {
    pub fn new(item_id: CardId, name: impl Into<String>, quantity: u32, unit_price: Price) -> Self {
        Self {
            item_id,
            name: name.into(),
            quantity,
            unit_price,
            line_total: unit_price.times(quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_totals() {
        let receipt = Receipt::new(vec![
            ReceiptLine::new(CardId::new("a"), "Shock", 2, Price::new(250.0)),
            ReceiptLine::new(CardId::new("b"), "Opt", 1, Price::new(100.0)),
        ]);

        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.total, Price::new(600.0));
        assert_eq!(receipt.lines[0].line_total, Price::new(500.0));
    }
}
