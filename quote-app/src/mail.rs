//! Email delivery of a quote.
//!
//! [`SmtpMailSender`] sends over SMTP with STARTTLS; [`LogMailSender`] only
//! records the message and is used when mail is not configured.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use crate::config::MailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail configuration error: {0}")]
    Configuration(String),

    #[error("invalid recipient '{0}'")]
    InvalidRecipient(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("failed to send email: {0}")]
    Send(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<PdfAttachment>,
}

impl EmailMessage {
    /// The message sent with a quote: fixed subject and body, PDF attached.
    pub fn for_quote(
        to: &str,
        quote_number: &str,
        attachment: PdfAttachment,
    ) -> Self {
        Self {
            to: to.trim().to_string(),
            subject: format!("Preventivo N. {quote_number}"),
            body: format!(
                "Gentile cliente,\n\nin allegato il preventivo N. {quote_number}.\n\n\
                 Cordiali saluti\nBelotti Macchine Agricole"
            ),
            attachment: Some(attachment),
        }
    }
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(
        &self,
        message: &EmailMessage,
    ) -> Result<(), MailError>;
}

/// Logs the message instead of sending it.
#[derive(Debug, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(
        &self,
        message: &EmailMessage,
    ) -> Result<(), MailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            attachment = message.attachment.as_ref().map(|a| a.file_name.as_str()),
            "mail delivery not configured; message not sent"
        );
        Ok(())
    }
}

pub struct SmtpMailSender {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
            .parse()
            .map_err(|e| MailError::Configuration(format!("invalid from address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Configuration(format!("failed to create SMTP relay: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { from, transport })
    }

    fn build(
        &self,
        message: &EmailMessage,
    ) -> Result<Message, MailError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|_| MailError::InvalidRecipient(message.to.clone()))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&message.subject);

        let text = SinglePart::builder()
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone());

        let result = match &message.attachment {
            Some(pdf) => {
                let content_type = ContentType::parse("application/pdf")
                    .map_err(|e| MailError::Build(e.to_string()))?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(text)
                        .singlepart(
                            Attachment::new(pdf.file_name.clone())
                                .body(pdf.bytes.clone(), content_type),
                        ),
                )
            }
            None => builder.singlepart(text),
        };
        result.map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(
        &self,
        message: &EmailMessage,
    ) -> Result<(), MailError> {
        let email = self.build(message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;
        info!(to = %message.to, subject = %message.subject, "email sent");
        Ok(())
    }
}

/// Picks the SMTP sender when mail is enabled, the logging one otherwise.
pub fn sender_from_config(config: &MailConfig) -> Result<Box<dyn MailSender>, MailError> {
    if config.enabled {
        Ok(Box::new(SmtpMailSender::new(config)?))
    } else {
        Ok(Box::new(LogMailSender))
    }
}
