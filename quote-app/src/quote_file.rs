//! Quote documents stored as TOML.
//!
//! All keys are optional; missing ones take the values of a fresh quote
//! (number and date from the clock, one blank item). Line item totals are
//! always derived from quantity and unit price.
//!
//! ```toml
//! quote_number = "000731"
//! quote_date = "17/10/2026"
//! standard_discount_percent = 10
//! selected_template = "template2"
//!
//! [client]
//! name = "Azienda Agricola Rossi"
//! email = "rossi@example.it"
//!
//! [[items]]
//! code = "AV-420"
//! description = "Caricatore compatto"
//! quantity = 2
//! unit_price = "100.00"
//! ```

use std::path::Path;

use quote_core::QuoteDocument;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteFileError {
    #[error("cannot read quote '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid quote: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_from_str(input: &str) -> Result<QuoteDocument, QuoteFileError> {
    Ok(toml::from_str(input)?)
}

pub fn load_from_file(path: &Path) -> Result<QuoteDocument, QuoteFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| QuoteFileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&text)
}
