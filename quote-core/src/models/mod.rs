mod client_info;
mod line_item;
mod quote_document;
mod template_variant;

pub use client_info::ClientInfo;
pub use line_item::{LineItem, LineItemUpdate};
pub use quote_document::{PLACEHOLDER_LOGO, QuoteDocument, QuotePatch};
pub use template_variant::{ParseTemplateVariantError, TemplateVariant};
