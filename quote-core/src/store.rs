//! In-memory quote state for a single editing session.
//!
//! The store owns the current [`QuoteDocument`] and is the only place it is
//! mutated. Every change replaces whole fields; the item list is rebuilt on
//! each change rather than edited in place.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::calculations::{Totals, compute_totals};
use crate::models::{LineItem, LineItemUpdate, QuoteDocument, QuotePatch, TemplateVariant};

#[derive(Debug, Clone, Default)]
pub struct QuoteStore {
    document: QuoteDocument,
}

impl QuoteStore {
    /// Wraps an existing document. An empty item list gets one blank item and
    /// repeated item ids are reissued.
    pub fn new(mut document: QuoteDocument) -> Self {
        document.items = with_unique_ids(document.items);
        if document.items.is_empty() {
            document.items.push(LineItem::default());
        }
        Self { document }
    }

    pub fn get(&self) -> &QuoteDocument {
        &self.document
    }

    /// Derives totals from the current document.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.document)
    }

    /// Shallow-merges the fields present in `patch` into the document.
    ///
    /// An empty `items` list is ignored so the document always keeps at least
    /// one line item. Repeated item ids in the patch are reissued.
    pub fn apply_partial(
        &mut self,
        patch: QuotePatch,
    ) {
        let doc = &mut self.document;
        let client = &mut doc.client;

        set(&mut doc.quote_number, patch.quote_number);
        set(&mut doc.quote_date, patch.quote_date);
        set(&mut client.name, patch.client_name);
        set(&mut client.address, patch.client_address);
        set(&mut client.city, patch.client_city);
        set(&mut client.email, patch.client_email);
        set(&mut client.phone, patch.client_phone);
        set(&mut client.vat_id, patch.client_vat_id);
        set(&mut client.fiscal_code, patch.client_fiscal_code);
        set(&mut doc.standard_discount_percent, patch.standard_discount_percent);
        set(&mut doc.extra_discount_percent, patch.extra_discount_percent);
        set(&mut doc.campaign_name, patch.campaign_name);
        set(&mut doc.objective_discount_amount, patch.objective_discount_amount);
        set(&mut doc.payment_method, patch.payment_method);
        set(&mut doc.delivery_date, patch.delivery_date);
        set(&mut doc.notes, patch.notes);
        set(&mut doc.company_logo, patch.company_logo);
        set(&mut doc.selected_template, patch.selected_template);

        match patch.items {
            Some(items) if items.is_empty() => {
                debug!("ignoring patch that would leave the quote without items");
            }
            Some(items) => {
                debug!(count = items.len(), "replacing line items");
                doc.items = with_unique_ids(items);
            }
            None => {}
        }
    }

    /// Appends a blank line item and returns its id.
    pub fn add_line_item(&mut self) -> Uuid {
        let item = LineItem::default();
        let id = item.id;
        let mut items = self.document.items.clone();
        items.push(item);
        self.document.items = items;
        debug!(%id, "line item added");
        id
    }

    /// Removes the item with `id`, unless it is the only one left.
    pub fn remove_line_item(
        &mut self,
        id: Uuid,
    ) {
        if self.document.items.len() <= 1 {
            debug!(%id, "refusing to remove the last line item");
            return;
        }
        let Some(index) = self.document.items.iter().position(|item| item.id == id) else {
            debug!(%id, "removal of unknown line item ignored");
            return;
        };
        let mut items = self.document.items.clone();
        items.remove(index);
        self.document.items = items;
    }

    /// Replaces one field of the item with `id`; unknown ids are ignored.
    pub fn update_line_item(
        &mut self,
        id: Uuid,
        update: LineItemUpdate,
    ) {
        if !self.document.items.iter().any(|item| item.id == id) {
            debug!(%id, "update for unknown line item ignored");
            return;
        }
        self.document.items = self
            .document
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    item.apply(update.clone())
                } else {
                    item.clone()
                }
            })
            .collect();
    }

    pub fn set_template(
        &mut self,
        template: TemplateVariant,
    ) {
        debug!(%template, "template selected");
        self.document.selected_template = template;
    }
}

/// Keeps the first occurrence of each id and gives later repeats a new one.
fn with_unique_ids(items: Vec<LineItem>) -> Vec<LineItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .map(|mut item| {
            if !seen.insert(item.id) {
                let fresh = Uuid::new_v4();
                debug!(duplicate = %item.id, %fresh, "line item id reissued");
                item.id = fresh;
                seen.insert(fresh);
            }
            item
        })
        .collect()
}

fn set<T>(
    field: &mut T,
    value: Option<T>,
) {
    if let Some(value) = value {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn store_with_items(n: usize) -> QuoteStore {
        let mut store = QuoteStore::default();
        for _ in 1..n {
            store.add_line_item();
        }
        store
    }

    // =========================================================================
    // apply_partial
    // =========================================================================

    #[test]
    fn apply_partial_only_touches_named_fields() {
        let mut store = QuoteStore::default();
        let before = store.get().clone();

        store.apply_partial(QuotePatch {
            client_name: Some("Azienda Agricola Rossi".into()),
            standard_discount_percent: Some(dec!(10)),
            ..Default::default()
        });

        let after = store.get();
        assert_eq!(after.client.name, "Azienda Agricola Rossi");
        assert_eq!(after.standard_discount_percent, dec!(10));
        assert_eq!(after.quote_number, before.quote_number);
        assert_eq!(after.items, before.items);
        assert_eq!(after.client.email, before.client.email);
    }

    #[test]
    fn apply_partial_replaces_items_wholesale() {
        let mut store = store_with_items(3);
        let replacement = vec![LineItem::new("X", "only", 1, dec!(5))];

        store.apply_partial(QuotePatch {
            items: Some(replacement.clone()),
            ..Default::default()
        });

        assert_eq!(store.get().items, replacement);
    }

    #[test]
    fn apply_partial_ignores_empty_item_list() {
        let mut store = QuoteStore::default();

        store.apply_partial(QuotePatch {
            items: Some(Vec::new()),
            ..Default::default()
        });

        assert_eq!(store.get().items.len(), 1);
    }

    #[test]
    fn discounts_over_one_hundred_are_kept_as_entered() {
        let mut store = QuoteStore::default();

        store.apply_partial(QuotePatch {
            extra_discount_percent: Some(dec!(150)),
            ..Default::default()
        });

        assert_eq!(store.get().extra_discount_percent, dec!(150));
    }

    #[test]
    fn new_store_fills_empty_item_list() {
        let doc = QuoteDocument {
            items: Vec::new(),
            ..Default::default()
        };

        let store = QuoteStore::new(doc);

        assert_eq!(store.get().items.len(), 1);
    }

    // =========================================================================
    // line items
    // =========================================================================

    #[test]
    fn add_line_item_appends_blank_item_with_unique_id() {
        let mut store = QuoteStore::default();
        let first = store.get().items[0].clone();

        let id = store.add_line_item();

        let items = &store.get().items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], first);
        assert_eq!(items[1].id, id);
        assert_ne!(items[1].id, first.id);
        assert_eq!(items[1].total, dec!(0));
    }

    #[test]
    fn removing_last_item_is_a_no_op() {
        let mut store = QuoteStore::default();
        let id = store.get().items[0].id;

        store.remove_line_item(id);

        assert_eq!(store.get().items.len(), 1);
        assert_eq!(store.get().items[0].id, id);
    }

    #[test]
    fn removing_items_keeps_the_others_intact() {
        let mut store = store_with_items(5);
        let ids: Vec<Uuid> = store.get().items.iter().map(|i| i.id).collect();
        store.update_line_item(ids[4], LineItemUpdate::UnitPrice(dec!(7)));
        let kept: Vec<LineItem> = store
            .get()
            .items
            .iter()
            .filter(|i| i.id != ids[1] && i.id != ids[3])
            .cloned()
            .collect();

        store.remove_line_item(ids[1]);
        store.remove_line_item(ids[3]);

        assert_eq!(store.get().items, kept);
    }

    #[test]
    fn repeated_ids_are_reissued_on_load() {
        let shared = Uuid::new_v4();
        let store = QuoteStore::new(QuoteDocument {
            items: vec![
                LineItem::with_id(shared, "A", "", 1, dec!(10)),
                LineItem::with_id(shared, "B", "", 2, dec!(20)),
            ],
            ..Default::default()
        });

        let items = &store.get().items;
        assert_eq!(items[0].id, shared);
        assert_ne!(items[1].id, shared);
        assert_eq!(items[1].code, "B");
        assert_eq!(items[1].total, dec!(40));
    }

    #[test]
    fn removing_a_repeated_id_keeps_one_item() {
        let shared = Uuid::new_v4();
        let mut store = QuoteStore::new(QuoteDocument {
            items: vec![
                LineItem::with_id(shared, "A", "", 1, dec!(10)),
                LineItem::with_id(shared, "B", "", 1, dec!(20)),
            ],
            ..Default::default()
        });

        store.remove_line_item(shared);

        let items = &store.get().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "B");
    }

    #[test]
    fn apply_partial_reissues_repeated_ids() {
        let mut store = QuoteStore::default();
        let shared = Uuid::new_v4();

        store.apply_partial(QuotePatch {
            items: Some(vec![
                LineItem::with_id(shared, "A", "", 1, dec!(1)),
                LineItem::with_id(shared, "B", "", 1, dec!(2)),
                LineItem::with_id(shared, "C", "", 1, dec!(3)),
            ]),
            ..Default::default()
        });

        let ids: HashSet<Uuid> = store.get().items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&shared));
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let mut store = store_with_items(2);
        let before = store.get().items.clone();

        store.remove_line_item(Uuid::new_v4());

        assert_eq!(store.get().items, before);
    }

    #[test]
    fn update_line_item_recomputes_only_that_item() {
        let mut store = store_with_items(2);
        let target = store.get().items[0].id;
        let other = store.get().items[1].clone();

        store.update_line_item(target, LineItemUpdate::Quantity(2));
        store.update_line_item(target, LineItemUpdate::UnitPrice(dec!(100.00)));

        let items = &store.get().items;
        assert_eq!(items[0].total, dec!(200.00));
        assert_eq!(items[1], other);
    }

    #[test]
    fn totals_hold_after_every_update() {
        let mut store = store_with_items(3);
        let ids: Vec<Uuid> = store.get().items.iter().map(|i| i.id).collect();
        let updates = [
            (ids[0], LineItemUpdate::Quantity(3)),
            (ids[1], LineItemUpdate::UnitPrice(dec!(19.99))),
            (ids[0], LineItemUpdate::UnitPrice(dec!(0.333))),
            (ids[2], LineItemUpdate::Quantity(-4)),
            (ids[1], LineItemUpdate::Quantity(0)),
        ];

        for (id, update) in updates {
            store.update_line_item(id, update);
            for item in &store.get().items {
                assert_eq!(item.total, rust_decimal::Decimal::from(item.quantity) * item.unit_price);
            }
        }
    }

    #[test]
    fn set_template_leaves_document_data_alone() {
        let mut store = store_with_items(2);
        store.apply_partial(QuotePatch {
            notes: Some("Consegna in cantiere".into()),
            ..Default::default()
        });
        let before = store.get().clone();
        let totals_before = store.totals();

        store.set_template(TemplateVariant::BilingualDistributor);

        let after = store.get();
        assert_eq!(after.selected_template, TemplateVariant::BilingualDistributor);
        assert_eq!(
            QuoteDocument {
                selected_template: before.selected_template,
                ..after.clone()
            },
            before
        );
        assert_eq!(store.totals(), totals_before);
    }
}
