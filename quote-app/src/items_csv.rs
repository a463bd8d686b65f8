//! CSV import of quote line items from a dealer price list.
//!
//! ## CSV Format
//!
//! Headers are matched by name, column order does not matter.
//!
//! | Column        | Required | Type    | Notes                     |
//! |---------------|----------|---------|---------------------------|
//! | `code`        | no       | string  | article code              |
//! | `description` | no       | string  |                           |
//! | `quantity`    | no       | integer | empty cell means `1`      |
//! | `unit_price`  | yes      | decimal | e.g. `18500.00`           |
//!
//! ```csv
//! code,description,quantity,unit_price
//! AV-420,Caricatore compatto Avant 420,1,18500.00
//! BK-120,Benna da terra 120 cm,2,640.00
//! ```

use std::path::Path;

use quote_core::LineItem;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
    quantity: Option<i64>,
    unit_price: Decimal,
}

#[derive(Debug, Error)]
pub enum ItemImportError {
    /// The CSV was structurally invalid or a cell had the wrong type.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parses CSV text into line items, in file order, each with a fresh id.
pub fn load_from_str(input: &str) -> Result<Vec<LineItem>, ItemImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let mut items = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        items.push(LineItem::new(
            row.code,
            row.description,
            row.quantity.unwrap_or(1),
            row.unit_price,
        ));
    }
    Ok(items)
}

pub async fn load_from_file(path: &Path) -> Result<Vec<LineItem>, ItemImportError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|source| ItemImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let items = load_from_str(&text)?;
    tracing::debug!(path = %path.display(), count = items.len(), "line items imported");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rows_become_items_with_derived_totals() {
        let csv = "code,description,quantity,unit_price\n\
                   AV-420,Caricatore,1,18500.00\n\
                   BK-120,Benna,2,640.00\n";

        let items = load_from_str(csv).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].code, "BK-120");
        assert_eq!(items[1].total, dec!(1280.00));
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn column_order_and_whitespace_do_not_matter() {
        let csv = "unit_price, code ,quantity\n 12.5 , X ,  4\n";

        let items = load_from_str(csv).unwrap();

        assert_eq!(items[0].code, "X");
        assert_eq!(items[0].total, dec!(50.0));
        assert_eq!(items[0].description, "");
    }

    #[test]
    fn empty_quantity_defaults_to_one() {
        let items = load_from_str("code,quantity,unit_price\nA,,9.90\n").unwrap();

        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn header_only_gives_no_items() {
        assert!(load_from_str("code,unit_price\n").unwrap().is_empty());
    }

    #[test]
    fn oversized_rows_load_with_saturated_totals() {
        let csv = "code,quantity,unit_price\nX,1000000000000,100000000000000000\n";

        let items = load_from_str(csv).unwrap();

        assert_eq!(items[0].total, Decimal::MAX);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let result = load_from_file(Path::new("/this/path/does/not/exist.csv")).await;

        assert!(matches!(result, Err(ItemImportError::Io { .. })));
    }

    #[test]
    fn bad_price_is_a_parse_error() {
        let result = load_from_str("code,unit_price\nA,abc\n");

        assert!(matches!(result, Err(ItemImportError::Parse(_))));
    }
}
