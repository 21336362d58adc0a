//! Remote card metadata.

use crate::ids::CardId;
use serde::{Deserialize, Serialize};

/// Descriptive metadata for one card, as resolved by a name lookup.
///
/// Lookup implementations normalise their wire format into this shape;
/// missing optional text is represented by empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CardMetadata {
    /// Stable printing id.
    pub id: CardId,
    /// Canonical name.
    pub name: String,
    /// Free-text type line, e.g. `Creature — Goblin`.
    pub type_line: String,
    /// Color symbols (`W`, `U`, `B`, `R`, `G`), possibly empty.
    pub colors: Vec<String>,
    pub mana_cost: String,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub oracle_text: String,
    /// Rarity tier: common, uncommon, rare or mythic.
    pub rarity: String,
    pub set_name: String,
    pub image_uri: Option<String>,
    pub detail_uri: Option<String>,
}
