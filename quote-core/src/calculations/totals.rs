//! Quote totals: subtotal, the three discounts, net price, VAT and grand total.
//!
//! | Value | Formula |
//! |-------|---------|
//! | subtotal | sum of line totals |
//! | standard discount | subtotal × standard % / 100 |
//! | extra discount | subtotal × extra % / 100 |
//! | objective discount | flat amount, passed through |
//! | net total | subtotal − the three discounts |
//! | VAT | net total × 0.22 |
//! | total with VAT | net total + VAT |
//!
//! Values are kept at full precision; rounding happens only for display.
//! Results outside the `Decimal` range saturate at its bounds.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{LineItem, QuoteDocument, calculations::compute_totals};
//!
//! let doc = QuoteDocument {
//!     items: vec![LineItem::new("", "", 2, dec!(100.00))],
//!     standard_discount_percent: dec!(10),
//!     extra_discount_percent: dec!(5),
//!     ..Default::default()
//! };
//!
//! let totals = compute_totals(&doc);
//! assert_eq!(totals.net_total, dec!(170.00));
//! assert_eq!(totals.total_with_vat, dec!(207.40));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::QuoteDocument;

/// Italian VAT (IVA) applied to the net total.
pub const VAT_RATE: Decimal = Decimal::from_parts(22, 0, 0, false, 2);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub standard_discount_amount: Decimal,
    pub extra_discount_amount: Decimal,
    pub objective_discount_amount: Decimal,
    pub net_total: Decimal,
    pub vat: Decimal,
    pub total_with_vat: Decimal,
}

/// Derives the totals of `document`. Pure; order of items does not matter.
pub fn compute_totals(document: &QuoteDocument) -> Totals {
    let subtotal = document
        .items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.total));
    let standard_discount_amount = percent_of(subtotal, document.standard_discount_percent);
    let extra_discount_amount = percent_of(subtotal, document.extra_discount_percent);
    let objective_discount_amount = document.objective_discount_amount;
    let net_total = subtotal
        .saturating_sub(standard_discount_amount)
        .saturating_sub(extra_discount_amount)
        .saturating_sub(objective_discount_amount);
    let vat = net_total.saturating_mul(VAT_RATE);

    Totals {
        subtotal,
        standard_discount_amount,
        extra_discount_amount,
        objective_discount_amount,
        net_total,
        vat,
        total_with_vat: net_total.saturating_add(vat),
    }
}

fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Decimal {
    amount.saturating_mul(percent) / HUNDRED
}

/// VAT rate as a whole percentage, for labels ("22").
pub fn vat_percent_label() -> String {
    (VAT_RATE * HUNDRED).normalize().to_string()
}
