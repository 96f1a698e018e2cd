use crate::error::TakeoffError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a quantity or price token from an estimate into a Decimal.
///
/// Handles formats like:
/// - "2" -> 2
/// - "12.5" -> 12.5
/// - "1,250.00" -> 1250.00 (thousands separators)
/// - "$450.00" -> 450.00
pub fn parse_decimal(s: &str) -> Result<Decimal, TakeoffError> {
    let s = s.trim();
    let normalized = s.trim_start_matches('$').replace(',', "");
    // "450." is a valid price token in the row grammar
    let normalized = normalized.strip_suffix('.').unwrap_or(&normalized);
    Decimal::from_str(normalized)
        .map_err(|e| TakeoffError::ParseError(format!("invalid number '{}': {}", s, e)))
}
