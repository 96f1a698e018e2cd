pub mod group;
pub mod rows;
pub mod scope;
pub mod values;

use crate::model::{DocumentExtract, Item, Subitem};
use group::identify_group;
use rows::parse_block;
use scope::{find_item_name, is_scope_sentinel};

/// Parse the full text of one estimate document into items and subitems.
///
/// Every scope sentinel with a resolvable item name yields one Item, followed
/// by the Subitems parsed from the lines below it. Sentinels without an item
/// name are skipped together with their block. Empty text yields an empty
/// extract.
pub fn parse_document(text: &str, source: &str) -> DocumentExtract {
    let mut extract = DocumentExtract {
        source: source.to_string(),
        group: identify_group(text, source),
        ..Default::default()
    };

    if text.trim().is_empty() {
        return extract;
    }

    let lines: Vec<&str> = text.lines().collect();

    for (index, line) in lines.iter().enumerate() {
        if !is_scope_sentinel(line) {
            continue;
        }

        let Some(item_name) = find_item_name(&lines, index) else {
            tracing::debug!(source, line = index + 1, "no item name above scope block, skipping");
            continue;
        };

        let block = parse_block(&lines[index + 1..]);
        extract.skipped_lines += block.skipped;

        for row in block.rows {
            extract.subitems.push(Subitem {
                item: item_name.clone(),
                description: row.description,
                quantity: row.quantity,
                unit: row.unit,
                unit_price: row.unit_price,
                group: extract.group.clone(),
                source: extract.source.clone(),
            });
        }

        extract.items.push(Item {
            group: extract.group.clone(),
            name: item_name,
            source: extract.source.clone(),
        });
    }

    extract
}
