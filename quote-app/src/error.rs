use thiserror::Error;

use crate::export::ExportError;
use crate::items_csv::ItemImportError;
use crate::logo::LogoError;
use crate::mail::MailError;
use crate::notification::Notification;

/// A required field is missing before a send action.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("client email is required to send the quote by email")]
    MissingClientEmail,

    #[error("client phone is required to share the quote via WhatsApp")]
    MissingClientPhone,
}

/// Any failure of a user action. Converted to a [`Notification`] at the
/// session boundary and never propagated further.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error(transparent)]
    Logo(#[from] LogoError),

    #[error(transparent)]
    ItemImport(#[from] ItemImportError),
}

impl ActionError {
    pub fn to_notification(&self) -> Notification {
        match self {
            ActionError::Validation(ValidationError::MissingClientEmail) => Notification::destructive(
                "Email mancante",
                "Inserisci l'email del cliente per inviare il preventivo",
            ),
            ActionError::Validation(ValidationError::MissingClientPhone) => {
                Notification::destructive(
                    "Numero di telefono mancante",
                    "Inserisci il numero di telefono del cliente per inviare il preventivo via WhatsApp",
                )
            }
            ActionError::Export(_) => Notification::destructive(
                "Errore",
                "Si è verificato un errore durante la generazione del PDF",
            ),
            ActionError::Mail(_) => Notification::destructive(
                "Errore",
                "Si è verificato un errore durante l'invio dell'email",
            ),
            ActionError::Logo(_) => Notification::destructive(
                "Errore",
                "Impossibile caricare il logo aziendale",
            ),
            ActionError::ItemImport(e) => Notification::destructive(
                "Errore",
                format!("Impossibile importare gli articoli: {e}"),
            ),
        }
    }
}
