use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TakeoffError;
use crate::parsing::values::parse_decimal;

/// A named work-scope entry that introduces a block of priced subitems.
///
/// Field order matches the items table: Group, Item, Source PDF.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Item")]
    pub name: String,
    #[serde(rename = "Source PDF")]
    pub source: String,
}

/// One priced line under an item.
///
/// Quantity and unit price are kept as the text found in the document
/// (thousands separators removed from the price). Use the `*_value`
/// accessors to get them as decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subitem {
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Subitem")]
    pub description: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Unit Price")]
    pub unit_price: String,
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Source PDF")]
    pub source: String,
}

impl Subitem {
    pub fn quantity_value(&self) -> Result<Decimal, TakeoffError> {
        parse_decimal(&self.quantity)
    }

    pub fn unit_price_value(&self) -> Result<Decimal, TakeoffError> {
        parse_decimal(&self.unit_price)
    }
}

/// Everything extracted from a single estimate document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentExtract {
    pub source: String,
    pub group: String,
    pub items: Vec<Item>,
    pub subitems: Vec<Subitem>,
    /// Lines inside scope blocks that did not match the row grammar.
    pub skipped_lines: usize,
}
