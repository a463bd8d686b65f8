use chrono::{DateTime, Local, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClientInfo, LineItem, TemplateVariant};

/// Logo reference used until the user picks an image.
pub const PLACEHOLDER_LOGO: &str = "/placeholder.svg?height=100&width=200";

/// The quote being built during a session.
///
/// Discount percentages are stored exactly as entered; nothing clamps them
/// to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteDocument {
    pub quote_number: String,
    pub quote_date: String,
    pub client: ClientInfo,
    pub items: Vec<LineItem>,
    pub standard_discount_percent: Decimal,
    pub extra_discount_percent: Decimal,
    pub campaign_name: String,
    pub objective_discount_amount: Decimal,
    pub payment_method: String,
    pub delivery_date: String,
    pub notes: String,
    /// Data URI of the uploaded logo, or [`PLACEHOLDER_LOGO`].
    pub company_logo: String,
    pub selected_template: TemplateVariant,
}

impl QuoteDocument {
    /// Creates a fresh document with number and date seeded from `now`.
    ///
    /// The quote number is the last six digits of the epoch milliseconds,
    /// the date is `dd/mm/yyyy`.
    pub fn seeded<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let millis = now.timestamp_millis().to_string();
        let quote_number = millis[millis.len().saturating_sub(6)..].to_string();

        Self {
            quote_number,
            quote_date: now.format("%d/%m/%Y").to_string(),
            client: ClientInfo::default(),
            items: vec![LineItem::default()],
            standard_discount_percent: Decimal::ZERO,
            extra_discount_percent: Decimal::ZERO,
            campaign_name: String::new(),
            objective_discount_amount: Decimal::ZERO,
            payment_method: String::new(),
            delivery_date: String::new(),
            notes: String::new(),
            company_logo: PLACEHOLDER_LOGO.to_string(),
            selected_template: TemplateVariant::default(),
        }
    }

    /// Returns `true` when the logo is still the placeholder reference.
    pub fn has_placeholder_logo(&self) -> bool {
        self.company_logo.is_empty() || self.company_logo == PLACEHOLDER_LOGO
    }
}

impl Default for QuoteDocument {
    fn default() -> Self {
        Self::seeded(&Local::now())
    }
}

/// A partial update of a [`QuoteDocument`].
///
/// Fields left as `None` are not touched. `items` replaces the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotePatch {
    pub quote_number: Option<String>,
    pub quote_date: Option<String>,
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub client_city: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_vat_id: Option<String>,
    pub client_fiscal_code: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub standard_discount_percent: Option<Decimal>,
    pub extra_discount_percent: Option<Decimal>,
    pub campaign_name: Option<String>,
    pub objective_discount_amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub delivery_date: Option<String>,
    pub notes: Option<String>,
    pub company_logo: Option<String>,
    pub selected_template: Option<TemplateVariant>,
}

impl QuotePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
