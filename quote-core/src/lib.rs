pub mod calculations;
pub mod models;
pub mod render;
pub mod store;

pub use calculations::{Totals, VAT_RATE};
pub use models::*;
pub use render::{RenderedDocument, render};
pub use store::QuoteStore;
