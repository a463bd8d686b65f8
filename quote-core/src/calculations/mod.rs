//! Quote arithmetic.
//!
//! Totals are derived from a [`QuoteDocument`](crate::QuoteDocument) on every
//! read and never stored.

pub mod common;
pub mod totals;

pub use totals::{Totals, VAT_RATE, compute_totals};
