//! WhatsApp share link for a quote.

use tracing::info;

use crate::error::ValidationError;

const SHARE_BASE: &str = "https://wa.me/";

const DEALER_NAME: &str = "Belotti Macchine Agricole";

/// Opens a share link with whatever the host platform provides.
pub trait LinkOpener: Send + Sync {
    fn open(
        &self,
        url: &str,
    );
}

/// Prints the link so the user can open it; used by the command line.
#[derive(Debug, Default)]
pub struct PrintLinkOpener;

impl LinkOpener for PrintLinkOpener {
    fn open(
        &self,
        url: &str,
    ) {
        info!(%url, "share link ready");
        println!("{url}");
    }
}

/// Keeps only the ASCII digits of a phone number (`"+39 346 ..."` → `"39346..."`).
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Pre-filled message sent along with the link.
pub fn share_message(quote_number: &str) -> String {
    format!("Preventivo N. {quote_number} da {DEALER_NAME}")
}

/// Builds `https://wa.me/<digits>?text=<message>` for the client phone.
///
/// A blank phone number is refused.
pub fn share_link(
    phone: &str,
    quote_number: &str,
) -> Result<String, ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::MissingClientPhone);
    }
    Ok(format!(
        "{SHARE_BASE}{}?text={}",
        digits_only(phone),
        urlencoding::encode(&share_message(quote_number))
    ))
}
