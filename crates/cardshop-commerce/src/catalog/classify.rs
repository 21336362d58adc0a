//! Classification of remote card metadata.
//!
//! Precedence lives in the tables below rather than in branch order, so the
//! rules can be inspected and tested directly.

use crate::catalog::{Attribute, Category};

/// Type-line keywords tested in order; the first substring match wins.
///
/// Creature comes first so that "Artifact Creature" and "Enchantment
/// Creature" classify as creatures.
pub const CATEGORY_PRECEDENCE: [(&str, Category); 7] = [
    ("creature", Category::Creature),
    ("instant", Category::Instant),
    ("sorcery", Category::Sorcery),
    ("enchantment", Category::Enchantment),
    ("artifact", Category::Artifact),
    ("planeswalker", Category::Planeswalker),
    ("land", Category::Land),
];

/// Color symbols as reported by the metadata service.
pub const ATTRIBUTE_SYMBOLS: [(&str, Attribute); 5] = [
    ("W", Attribute::White),
    ("U", Attribute::Blue),
    ("B", Attribute::Black),
    ("R", Attribute::Red),
    ("G", Attribute::Green),
];

/// Derive a category from a free-text type line.
pub fn classify_type_line(type_line: &str) -> Category {
    let type_line = type_line.to_lowercase();
    CATEGORY_PRECEDENCE
        .iter()
        .find(|(keyword, _)| type_line.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

/// Derive the primary attribute from the first entry of a color list.
pub fn attribute_from_colors(colors: &[String]) -> Attribute {
    colors
        .first()
        .and_then(|first| {
            ATTRIBUTE_SYMBOLS
                .iter()
                .find(|(symbol, _)| symbol.eq_ignore_ascii_case(first.trim()))
                .map(|(_, attribute)| *attribute)
        })
        .unwrap_or(Attribute::Colorless)
}

/// Display label for a rarity tier, e.g. `mythic` -> `Mythic`.
pub fn rarity_label(raw: &str) -> String {
    let raw = raw.trim();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => "Unknown".to_string(),
    }
}
