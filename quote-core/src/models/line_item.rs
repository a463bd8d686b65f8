use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One priced row of a quote.
///
/// `total` is derived from `quantity * unit_price` and is kept in step by
/// [`LineItem::apply`]; the fields are public for reading, construction goes
/// through [`LineItem::new`] or deserialization, both of which derive the total.
/// A product outside the `Decimal` range saturates at its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LineItemRecord")]
pub struct LineItem {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// A single field replacement on a line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemUpdate {
    Code(String),
    Description(String),
    Quantity(i64),
    UnitPrice(Decimal),
}

impl LineItem {
    /// Creates an item with a fresh id and a derived total.
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), code, description, quantity, unit_price)
    }

    pub fn with_id(
        id: Uuid,
        code: impl Into<String>,
        description: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            description: description.into(),
            quantity,
            unit_price,
            total: line_total(quantity, unit_price),
        }
    }

    /// Returns a copy of this item with `update` applied.
    ///
    /// Quantity and unit price changes recompute the total from the new value
    /// and the existing other factor.
    pub fn apply(
        &self,
        update: LineItemUpdate,
    ) -> Self {
        let mut item = self.clone();
        match update {
            LineItemUpdate::Code(code) => item.code = code,
            LineItemUpdate::Description(description) => item.description = description,
            LineItemUpdate::Quantity(quantity) => {
                item.quantity = quantity;
                item.total = line_total(quantity, item.unit_price);
            }
            LineItemUpdate::UnitPrice(unit_price) => {
                item.unit_price = unit_price;
                item.total = line_total(item.quantity, unit_price);
            }
        }
        item
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new("", "", 1, Decimal::ZERO)
    }
}

fn line_total(
    quantity: i64,
    unit_price: Decimal,
) -> Decimal {
    Decimal::from(quantity).saturating_mul(unit_price)
}

/// On-disk shape of a line item: the id is optional and the total is never read.
#[derive(Debug, Deserialize)]
struct LineItemRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_quantity")]
    quantity: i64,
    #[serde(default)]
    unit_price: Decimal,
}

fn default_quantity() -> i64 {
    1
}

impl From<LineItemRecord> for LineItem {
    fn from(record: LineItemRecord) -> Self {
        Self::with_id(
            record.id,
            record.code,
            record.description,
            record.quantity,
            record.unit_price,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_item_derives_total() {
        let item = LineItem::new("AV-420", "Caricatore", 2, dec!(100.00));

        assert_eq!(item.total, dec!(200.00));
    }

    #[test]
    fn default_item_is_one_unit_at_zero() {
        let item = LineItem::default();

        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, Decimal::ZERO);
        assert_eq!(item.total, Decimal::ZERO);
        assert!(item.code.is_empty());
    }

    #[test]
    fn quantity_update_uses_existing_unit_price() {
        let item = LineItem::new("A", "", 1, dec!(12.50));

        let updated = item.apply(LineItemUpdate::Quantity(4));

        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.total, dec!(50.00));
        assert_eq!(updated.id, item.id);
    }

    #[test]
    fn unit_price_update_uses_existing_quantity() {
        let item = LineItem::new("A", "", 3, dec!(1));

        let updated = item.apply(LineItemUpdate::UnitPrice(dec!(9.99)));

        assert_eq!(updated.total, dec!(29.97));
    }

    #[test]
    fn text_updates_leave_total_alone() {
        let item = LineItem::new("A", "old", 2, dec!(5));

        let updated = item
            .apply(LineItemUpdate::Code("B".into()))
            .apply(LineItemUpdate::Description("new".into()));

        assert_eq!(updated.code, "B");
        assert_eq!(updated.description, "new");
        assert_eq!(updated.total, dec!(10));
    }

    #[test]
    fn negative_quantity_is_accepted() {
        let item = LineItem::new("A", "", 1, dec!(10)).apply(LineItemUpdate::Quantity(-2));

        assert_eq!(item.total, dec!(-20));
    }

    #[test]
    fn oversized_total_saturates() {
        let item = LineItem::new("", "", 1_000_000_000_000, dec!(100_000_000_000_000_000));

        assert_eq!(item.total, Decimal::MAX);

        let item = item.apply(LineItemUpdate::Quantity(-1_000_000_000_000));

        assert_eq!(item.total, Decimal::MIN);
    }

    #[test]
    fn apply_does_not_touch_original() {
        let item = LineItem::new("A", "", 1, dec!(10));

        let _ = item.apply(LineItemUpdate::Quantity(7));

        assert_eq!(item.quantity, 1);
        assert_eq!(item.total, dec!(10));
    }
}
