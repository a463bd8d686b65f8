use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes Italian-style numeric input.
///
/// When a comma is present it is the decimal separator and dots are thousands
/// separators (`"1.234,56"` → `"1234.56"`); otherwise the input is taken as-is.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    }
}

/// Parses a string into a [`Decimal`].
///
/// Empty or whitespace-only input is treated as 0. Negative values and
/// percentages above 100 are accepted as entered.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}
