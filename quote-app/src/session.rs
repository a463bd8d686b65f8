//! The application shell around a quote.
//!
//! [`QuoteSession`] owns the [`QuoteStore`] and the outward collaborators.
//! Editing goes straight to the store; the actions (export, email,
//! WhatsApp, logo and item import) catch their own failures and report them
//! as a [`Notification`]. A failed action never changes the quote.

use std::path::{Path, PathBuf};

use quote_core::{QuoteDocument, QuotePatch, QuoteStore, RenderedDocument, Totals, render};
use tracing::{error, info, warn};

use crate::error::{ActionError, ValidationError};
use crate::export::{ExportError, PdfExporter};
use crate::items_csv;
use crate::logo;
use crate::mail::{EmailMessage, MailSender, PdfAttachment};
use crate::messaging::{self, LinkOpener};
use crate::notification::Notification;

pub struct QuoteSession {
    store: QuoteStore,
    exporter: Box<dyn PdfExporter>,
    mailer: Box<dyn MailSender>,
    links: Box<dyn LinkOpener>,
    output_dir: PathBuf,
}

impl QuoteSession {
    pub fn new(
        document: QuoteDocument,
        exporter: Box<dyn PdfExporter>,
        mailer: Box<dyn MailSender>,
        links: Box<dyn LinkOpener>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store: QuoteStore::new(document),
            exporter,
            mailer,
            links,
            output_dir: output_dir.into(),
        }
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut QuoteStore {
        &mut self.store
    }

    pub fn document(&self) -> &QuoteDocument {
        self.store.get()
    }

    pub fn totals(&self) -> Totals {
        self.store.totals()
    }

    /// Lays out the current quote in its selected template.
    pub fn preview(&self) -> RenderedDocument {
        let doc = self.store.get();
        render(doc, &self.store.totals(), doc.selected_template)
    }

    /// Where [`export_pdf`](Self::export_pdf) writes the current quote.
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(self.preview().pdf_file_name())
    }

    /// Renders the current quote, exports it and writes
    /// `Preventivo_<quoteNumber>.pdf` into the output directory.
    pub async fn export_pdf(&self) -> Notification {
        match self.try_export_pdf().await {
            Ok(path) => {
                info!(path = %path.display(), "quote exported");
                Notification::info(
                    "PDF generato con successo",
                    "Il preventivo è stato scaricato come PDF",
                )
            }
            Err(e) => failed("export_pdf", e),
        }
    }

    async fn try_export_pdf(&self) -> Result<PathBuf, ActionError> {
        let attachment = self.export_snapshot().await?;
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(ExportError::from)?;
        let path = self.output_dir.join(&attachment.file_name);
        tokio::fs::write(&path, &attachment.bytes)
            .await
            .map_err(ExportError::from)?;
        Ok(path)
    }

    /// Renders now, then awaits the exporter on that snapshot.
    async fn export_snapshot(&self) -> Result<PdfAttachment, ExportError> {
        let document = self.preview();
        let bytes = self.exporter.export(&document).await?;
        Ok(PdfAttachment {
            file_name: document.pdf_file_name(),
            bytes,
        })
    }

    /// Emails the quote PDF to the client. Requires a client email.
    pub async fn send_email(&self) -> Notification {
        match self.try_send_email().await {
            Ok(to) => Notification::info("Email inviata", format!("Preventivo inviato a {to}")),
            Err(e) => failed("send_email", e),
        }
    }

    async fn try_send_email(&self) -> Result<String, ActionError> {
        let doc = self.store.get();
        let to = doc.client.email.trim();
        if to.is_empty() {
            return Err(ValidationError::MissingClientEmail.into());
        }

        let attachment = self.export_snapshot().await?;
        let message = EmailMessage::for_quote(to, &doc.quote_number, attachment);
        self.mailer.send(&message).await?;
        Ok(message.to)
    }

    /// Opens a WhatsApp share link for the client phone.
    pub fn send_whatsapp(&self) -> Notification {
        let doc = self.store.get();
        match messaging::share_link(&doc.client.phone, &doc.quote_number) {
            Ok(url) => {
                self.links.open(&url);
                Notification::info(
                    "WhatsApp aperto",
                    "Preventivo pronto per essere inviato via WhatsApp",
                )
            }
            Err(e) => failed("send_whatsapp", e.into()),
        }
    }

    /// Reads an image file and stores it as the company logo.
    pub async fn load_logo(
        &mut self,
        path: &Path,
    ) -> Notification {
        match logo::load_data_uri(path).await {
            Ok(uri) => {
                self.store.apply_partial(QuotePatch {
                    company_logo: Some(uri),
                    ..Default::default()
                });
                Notification::info("Logo caricato", "Il logo aziendale è stato aggiornato")
            }
            Err(e) => failed("load_logo", e.into()),
        }
    }

    /// Replaces the line items with the rows of a CSV price list.
    /// A file without rows leaves the items unchanged.
    pub async fn import_items(
        &mut self,
        path: &Path,
    ) -> Notification {
        match items_csv::load_from_file(path).await {
            Ok(items) if items.is_empty() => {
                Notification::info("Nessun articolo", "Il file non contiene articoli")
            }
            Ok(items) => {
                let count = items.len();
                self.store.apply_partial(QuotePatch {
                    items: Some(items),
                    ..Default::default()
                });
                Notification::info("Articoli importati", format!("{count} articoli importati"))
            }
            Err(e) => failed("import_items", e.into()),
        }
    }
}

fn failed(
    action: &'static str,
    error: ActionError,
) -> Notification {
    match &error {
        ActionError::Validation(_) => warn!(action, %error, "action refused"),
        _ => error!(action, ?error, "action failed"),
    }
    error.to_notification()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use quote_core::{LineItem, TemplateVariant};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::mail::MailError;
    use crate::notification::NotificationKind;

    #[derive(Default, Clone)]
    struct Calls(Arc<Mutex<Vec<String>>>);

    impl Calls {
        fn push(
            &self,
            call: String,
        ) {
            self.0.lock().unwrap().push(call);
        }

        fn all(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeExporter {
        calls: Calls,
        fail: bool,
    }

    #[async_trait]
    impl PdfExporter for FakeExporter {
        async fn export(
            &self,
            document: &RenderedDocument,
        ) -> Result<Vec<u8>, ExportError> {
            self.calls.push(format!("export {}", document.quote_number));
            if self.fail {
                Err(ExportError::Compile("boom".into()))
            } else {
                Ok(b"%PDF-1.7 fake".to_vec())
            }
        }
    }

    struct FakeMailer {
        calls: Calls,
    }

    #[async_trait]
    impl MailSender for FakeMailer {
        async fn send(
            &self,
            message: &EmailMessage,
        ) -> Result<(), MailError> {
            self.calls.push(format!("mail {} {}", message.to, message.subject));
            Ok(())
        }
    }

    struct FakeLinks {
        calls: Calls,
    }

    impl LinkOpener for FakeLinks {
        fn open(
            &self,
            url: &str,
        ) {
            self.calls.push(format!("open {url}"));
        }
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("quote-session-test-{}", uuid::Uuid::new_v4()))
    }

    fn session_with(
        fail_export: bool,
        output_dir: PathBuf,
    ) -> (QuoteSession, Calls) {
        let calls = Calls::default();
        let mut doc = QuoteDocument {
            quote_number: "4242".into(),
            items: vec![LineItem::new("AV-420", "Caricatore", 2, dec!(100.00))],
            ..Default::default()
        };
        doc.client.name = "Azienda Agricola Rossi".into();
        let session = QuoteSession::new(
            doc,
            Box::new(FakeExporter {
                calls: calls.clone(),
                fail: fail_export,
            }),
            Box::new(FakeMailer {
                calls: calls.clone(),
            }),
            Box::new(FakeLinks {
                calls: calls.clone(),
            }),
            output_dir,
        );
        (session, calls)
    }

    fn set_client(
        session: &mut QuoteSession,
        email: &str,
        phone: &str,
    ) {
        session.store_mut().apply_partial(QuotePatch {
            client_email: Some(email.into()),
            client_phone: Some(phone.into()),
            ..Default::default()
        });
    }

    // =========================================================================
    // email
    // =========================================================================

    #[tokio::test]
    async fn email_without_address_is_refused_without_side_effects() {
        let (session, calls) = session_with(false, scratch_dir());
        let before = session.document().clone();

        let note = session.send_email().await;

        assert_eq!(note.title, "Email mancante");
        assert_eq!(note.kind, NotificationKind::Destructive);
        assert!(calls.all().is_empty());
        assert_eq!(session.document(), &before);
    }

    #[tokio::test]
    async fn email_sends_pdf_to_client() {
        let (mut session, calls) = session_with(false, scratch_dir());
        set_client(&mut session, "rossi@example.it", "");

        let note = session.send_email().await;

        assert_eq!(
            note,
            Notification::info("Email inviata", "Preventivo inviato a rossi@example.it")
        );
        assert_eq!(
            calls.all(),
            vec![
                "export 4242".to_string(),
                "mail rossi@example.it Preventivo N. 4242".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn email_export_failure_skips_mailer() {
        let (mut session, calls) = session_with(true, scratch_dir());
        set_client(&mut session, "rossi@example.it", "");

        let note = session.send_email().await;

        assert!(note.is_error());
        assert_eq!(calls.all(), vec!["export 4242".to_string()]);
    }

    // =========================================================================
    // WhatsApp
    // =========================================================================

    #[test]
    fn whatsapp_opens_link_with_digits_only_phone() {
        let (mut session, calls) = session_with(false, scratch_dir());
        set_client(&mut session, "", "+39 346 233 2866");

        let note = session.send_whatsapp();

        assert_eq!(note.title, "WhatsApp aperto");
        let opened = calls.all();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].starts_with("open https://wa.me/393462332866?text="));
        assert!(opened[0].contains("4242"));
    }

    #[test]
    fn whatsapp_without_phone_is_refused() {
        let (session, calls) = session_with(false, scratch_dir());

        let note = session.send_whatsapp();

        assert_eq!(note.title, "Numero di telefono mancante");
        assert!(note.is_error());
        assert!(calls.all().is_empty());
    }

    // =========================================================================
    // export
    // =========================================================================

    #[tokio::test]
    async fn export_writes_named_pdf() {
        let dir = scratch_dir();
        let (session, _calls) = session_with(false, dir.clone());

        let note = session.export_pdf().await;

        assert_eq!(note.title, "PDF generato con successo");
        let path = dir.join("Preventivo_4242.pdf");
        assert_eq!(session.export_path(), path);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 fake".to_vec());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn export_failure_leaves_state_and_disk_untouched() {
        let dir = scratch_dir();
        let (session, _calls) = session_with(true, dir.clone());
        let before = session.document().clone();

        let note = session.export_pdf().await;

        assert_eq!(note.title, "Errore");
        assert!(note.is_error());
        assert_eq!(session.document(), &before);
        assert!(!dir.join("Preventivo_4242.pdf").exists());
    }

    #[tokio::test]
    async fn export_uses_selected_template() {
        let (mut session, _calls) = session_with(false, scratch_dir());
        let totals = session.totals();

        session
            .store_mut()
            .set_template(TemplateVariant::BilingualDistributor);

        assert_eq!(session.preview().template, TemplateVariant::BilingualDistributor);
        assert_eq!(session.totals(), totals);
    }

    // =========================================================================
    // logo and items
    // =========================================================================

    #[tokio::test]
    async fn missing_logo_file_keeps_placeholder() {
        let (mut session, _calls) = session_with(false, scratch_dir());

        let note = session.load_logo(Path::new("/no/such/logo.png")).await;

        assert!(note.is_error());
        assert!(session.document().has_placeholder_logo());
    }

    #[tokio::test]
    async fn logo_file_becomes_data_uri() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("logo.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let (mut session, _calls) = session_with(false, dir.clone());

        let note = session.load_logo(&path).await;

        assert!(!note.is_error());
        assert_eq!(session.document().company_logo, "data:image/png;base64,AQID");
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn importing_empty_price_list_keeps_items() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("items.csv");
        std::fs::write(&path, "code,unit_price\n").unwrap();
        let (mut session, _calls) = session_with(false, dir.clone());
        let before = session.document().items.clone();

        let note = session.import_items(&path).await;

        assert_eq!(note.title, "Nessun articolo");
        assert_eq!(session.document().items, before);
        let _ = std::fs::remove_dir_all(dir);
    }
}
