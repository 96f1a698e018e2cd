use regex::Regex;
use std::sync::LazyLock;

/// Row grammars tried in order against each line of a scope block.
///
/// Capture groups: 1 quantity, 2 unit, 3 description, 4 unit price.
/// The optional trailing dollar amount is the extended total column and is
/// matched but not captured.
static ROW_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "2 EA Interior door install $450.00 $900.00"
        r"^(\d+(?:\.\d+)?)\s+(\w+)\s+(.+?)\s+\$([\d,]+\.?\d*)(?:\s+\$[\d,]+\.?\d*)?\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid row pattern"))
    .collect()
});

/// Lines containing any of these (case-insensitive) close the current block.
const STOP_WORDS: &[&str] = &[
    "scope of work includes:",
    "total",
    "subtotal",
    "estimate total",
];

/// Descriptions must be longer than this many characters.
const MIN_DESCRIPTION_LEN: usize = 2;

/// Fields of one priced row, before they are tied to an item and group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub quantity: String,
    pub unit: String,
    pub description: String,
    pub unit_price: String,
}

/// Rows collected from one scope block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeBlock {
    pub rows: Vec<RowFields>,
    /// Lines inside the block that were not priced rows.
    pub skipped: usize,
}

/// True if `line` closes a scope block: blank, or containing a stop word.
pub fn ends_block(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lower = trimmed.to_lowercase();
    STOP_WORDS.iter().any(|w| lower.contains(w))
}

/// Collect priced rows from the lines following a scope sentinel.
///
/// Stops at the first line for which `ends_block` holds. Lines that don't
/// match a row grammar are counted and skipped; they do not close the block.
pub fn parse_block(lines: &[&str]) -> ScopeBlock {
    let mut block = ScopeBlock::default();

    for line in lines {
        if ends_block(line) {
            break;
        }
        match parse_row(line) {
            Some(row) => block.rows.push(row),
            None => block.skipped += 1,
        }
    }

    block
}

/// Try to parse a single line as a priced row.
///
/// Returns None if no row grammar matches or the description is too short.
pub fn parse_row(line: &str) -> Option<RowFields> {
    let line = line.trim();

    ROW_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(line)?;
        let description = caps[3].trim();
        if description.chars().count() <= MIN_DESCRIPTION_LEN {
            return None;
        }
        Some(RowFields {
            quantity: caps[1].to_string(),
            unit: normalize_unit(&caps[2]),
            description: description.to_string(),
            unit_price: caps[4].replace(',', ""),
        })
    })
}

/// Uppercase a unit token, folding "EA" into "EACH".
///
/// Other units pass through uppercased; "LF" and "LIN FT" are not merged.
pub fn normalize_unit(token: &str) -> String {
    let upper = token.to_uppercase();
    match upper.as_str() {
        "EA" | "EACH" => "EACH".to_string(),
        _ => upper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(quantity: &str, unit: &str, description: &str, unit_price: &str) -> RowFields {
        RowFields {
            quantity: quantity.into(),
            unit: unit.into(),
            description: description.into(),
            unit_price: unit_price.into(),
        }
    }

    #[test]
    fn test_row_with_extended_total() {
        assert_eq!(
            parse_row("2 EA Interior door install $450.00 $900.00"),
            Some(row("2", "EACH", "Interior door install", "450.00"))
        );
    }

    #[test]
    fn test_row_without_extended_total() {
        assert_eq!(
            parse_row("  120 sf   Tile floor, 12x24 porcelain   $8.50  "),
            Some(row("120", "SF", "Tile floor, 12x24 porcelain", "8.50"))
        );
    }

    #[test]
    fn test_decimal_quantity_and_thousands() {
        assert_eq!(
            parse_row("1.5 LS Demolition and haul-off $1,250.00 $1,875.00"),
            Some(row("1.5", "LS", "Demolition and haul-off", "1250.00"))
        );
    }

    #[test]
    fn test_price_kept_as_written() {
        assert_eq!(
            parse_row("3 each Outlet relocation $75"),
            Some(row("3", "EACH", "Outlet relocation", "75"))
        );
        assert_eq!(
            parse_row("1 LOT Cleanup $1,000."),
            Some(row("1", "LOT", "Cleanup", "1000."))
        );
    }

    #[test]
    fn test_unit_normalization() {
        assert_eq!(normalize_unit("ea"), "EACH");
        assert_eq!(normalize_unit("Each"), "EACH");
        assert_eq!(normalize_unit("lf"), "LF");
        assert_eq!(normalize_unit("EAS"), "EAS");
    }

    #[test]
    fn test_short_description_rejected() {
        assert_eq!(parse_row("1 EA Ok $10.00"), None);
        assert!(parse_row("1 EA Oak $10.00").is_some());
    }

    #[test]
    fn test_non_rows_rejected() {
        assert_eq!(parse_row("Includes all labor and material"), None);
        assert_eq!(parse_row("2 EA Door $450.00 extra words"), None);
        assert_eq!(parse_row("EA 2 Door install $450.00"), None);
        assert_eq!(parse_row("2 EA Door install 450.00"), None);
    }

    #[test]
    fn test_ends_block() {
        assert!(ends_block(""));
        assert!(ends_block("   \t"));
        assert!(ends_block("Subtotal $1,900.00"));
        assert!(ends_block("ESTIMATE TOTAL"));
        assert!(ends_block("2 EA Total station rental $50.00"));
        assert!(ends_block("The scope of work includes:"));
        assert!(!ends_block("2 EA Interior door install $450.00"));
    }

    #[test]
    fn test_parse_block_stops_at_subtotal() {
        let lines = [
            "2 EA Interior door install $450.00 $900.00",
            "Includes hardware",
            "1 LS Trim paint $300.00",
            "Subtotal $1,200.00",
            "5 EA Never reached $1.00",
        ];
        let block = parse_block(&lines);
        assert_eq!(block.rows.len(), 2);
        assert_eq!(block.rows[1].description, "Trim paint");
        assert_eq!(block.skipped, 1);
    }

    #[test]
    fn test_parse_block_stops_at_blank_line() {
        let lines = ["1 EA Vanity $600.00", "", "1 EA Mirror $80.00"];
        let block = parse_block(&lines);
        assert_eq!(block.rows, vec![row("1", "EACH", "Vanity", "600.00")]);
        assert_eq!(block.skipped, 0);
    }

    #[test]
    fn test_parse_block_empty() {
        assert_eq!(parse_block(&[]), ScopeBlock::default());
    }
}
