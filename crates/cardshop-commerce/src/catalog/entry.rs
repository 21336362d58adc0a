//! Catalog entry types.

use crate::catalog::{attribute_from_colors, classify_type_line, rarity_label};
use crate::catalog::{CardMetadata, InventoryRow};
use crate::ids::CardId;
use crate::price::{ExchangeRate, Price};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card category, derived from the type line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Creature,
    Instant,
    Sorcery,
    Enchantment,
    Artifact,
    Planeswalker,
    Land,
    #[default]
    Other,
}

impl Category {
    /// Every category, in classification order with `Other` last.
    pub const ALL: [Category; 8] = [
        Category::Creature,
        Category::Instant,
        Category::Sorcery,
        Category::Enchantment,
        Category::Artifact,
        Category::Planeswalker,
        Category::Land,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Creature => "creature",
            Category::Instant => "instant",
            Category::Sorcery => "sorcery",
            Category::Enchantment => "enchantment",
            Category::Artifact => "artifact",
            Category::Planeswalker => "planeswalker",
            Category::Land => "land",
            Category::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary color of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    White,
    Blue,
    Black,
    Red,
    Green,
    #[default]
    Colorless,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::White,
        Attribute::Blue,
        Attribute::Black,
        Attribute::Red,
        Attribute::Green,
        Attribute::Colorless,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::White => "white",
            Attribute::Blue => "blue",
            Attribute::Black => "black",
            Attribute::Red => "red",
            Attribute::Green => "green",
            Attribute::Colorless => "colorless",
        }
    }

    /// Accepts either the color name or its one-letter symbol.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s || a.symbol().is_some_and(|sym| sym.eq_ignore_ascii_case(&s)))
    }

    /// One-letter color symbol; colorless has none.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Attribute::White => Some("W"),
            Attribute::Blue => Some("U"),
            Attribute::Black => Some("B"),
            Attribute::Red => Some("R"),
            Attribute::Green => Some("G"),
            Attribute::Colorless => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sellable card: local commercial fields merged with remote metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Stable id from the metadata service.
    pub id: CardId,
    /// Canonical card name.
    pub name: String,
    pub category: Category,
    /// Primary color.
    pub attribute: Attribute,
    /// Mana cost symbols, e.g. `{1}{R}`.
    pub cost_symbol: String,
    pub power: Option<String>,
    pub toughness: Option<String>,
    /// Rules text.
    pub description: String,
    /// Unit price in the local currency.
    pub price: Price,
    /// Units on hand when the catalog was assembled.
    pub stock_quantity: u32,
    pub rarity_label: String,
    pub edition_name: String,
    pub image_ref: Option<String>,
    /// Canonical detail page.
    pub external_ref: Option<String>,
}

impl CatalogEntry {
    /// Merge an inventory row with the metadata resolved for it.
    pub fn merge(row: &InventoryRow, metadata: CardMetadata, rate: ExchangeRate) -> Self {
        Self {
            category: classify_type_line(&metadata.type_line),
            attribute: attribute_from_colors(&metadata.colors),
            rarity_label: rarity_label(&metadata.rarity),
            id: metadata.id,
            name: metadata.name,
            cost_symbol: metadata.mana_cost,
            power: metadata.power,
            toughness: metadata.toughness,
            description: metadata.oracle_text,
            price: rate.convert(row.unit_cost_usd),
            stock_quantity: row.quantity_on_hand,
            edition_name: metadata.set_name,
            image_ref: metadata.image_uri,
            external_ref: metadata.detail_uri,
        }
    }

    /// Check if any units are available.
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Power/toughness for creatures, e.g. `3/3`.
    pub fn stats(&self) -> Option<String> {
        match (&self.power, &self.toughness) {
            (Some(p), Some(t)) => Some(format!("{}/{}", p, t)),
            _ => None,
        }
    }
}
