//! Inventory rows and the tabular inventory format.
//!
//! The source is comma-separated text with a header row. Columns are
//! located by header name, so exports with extra columns in any order load
//! unchanged. Numeric fields are parsed leniently: anything unparsable
//! becomes zero instead of rejecting the row.

use crate::error::InventoryError;
use serde::{Deserialize, Serialize};

/// Header names of the required columns, compared case-insensitively.
pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "purchase price", "quantity"];

/// One line of local inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRow {
    /// Card name as typed by whoever keeps the inventory.
    pub name: String,
    /// Purchase price per unit in USD.
    pub unit_cost_usd: f64,
    /// Units on hand.
    pub quantity_on_hand: u32,
}

impl InventoryRow {
    /// Create a row. A negative or non-finite cost is stored as zero.
    pub fn new(name: impl Into<String>, unit_cost_usd: f64, quantity_on_hand: u32) -> Self {
        Self {
            name: name.into(),
            unit_cost_usd: sanitize_cost(unit_cost_usd),
            quantity_on_hand,
        }
    }
}

/// Parse inventory text into rows.
///
/// Blank lines and rows with an empty name are skipped. Fails only when the
/// header is absent or lacks a required column.
pub fn parse_inventory(text: &str) -> Result<Vec<InventoryRow>, InventoryError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text).into_iter();

    let (_, header) = records.next().ok_or(InventoryError::MissingHeader)?;
    let header: Vec<String> = header
        .into_iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut positions = [0usize; 3];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h == column)
            .ok_or(InventoryError::MissingColumn(column))?;
    }
    let [name_at, price_at, quantity_at] = positions;

    let mut rows = Vec::new();
    for (line_no, fields) in records {
        let field = |at: usize| fields.get(at).map(|f| f.trim()).unwrap_or("");

        let name = field(name_at);
        if name.is_empty() {
            tracing::debug!(line = line_no, "skipping inventory row without a name");
            continue;
        }

        rows.push(InventoryRow {
            name: name.to_string(),
            unit_cost_usd: parse_price(field(price_at)),
            quantity_on_hand: parse_quantity(field(quantity_at)),
        });
    }

    Ok(rows)
}

/// Split text into records of fields, honouring double quotes and `""`
/// escapes. A quoted field may span line breaks. Each record carries the
/// line number it starts on; blank lines yield no record.
fn split_records(text: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            _ => {
                if c == '\n' {
                    line += 1;
                }
                current.push(c);
            }
        }
    }

    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        push_record(&mut records, record_line, fields);
    }
    records
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push((line, fields));
    }
}

fn parse_price(raw: &str) -> f64 {
    let raw = raw.strip_prefix('$').unwrap_or(raw).trim();
    sanitize_cost(raw.parse::<f64>().unwrap_or(0.0))
}

fn parse_quantity(raw: &str) -> u32 {
    raw.parse::<u32>().unwrap_or(0)
}

fn sanitize_cost(cost: f64) -> f64 {
    if cost.is_finite() && cost > 0.0 {
        cost
    } else {
        0.0
    }
}
