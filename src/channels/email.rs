//! Report email delivery — SMTP via lettre, PDF attached.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};

use crate::error::DispatchError;

/// SMTP settings for the report mailer.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    pub receiver: String,
}

/// Email-sending collaborator: one message, one binary attachment,
/// all-or-nothing.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_report(
        &self,
        subject: &str,
        body: &str,
        attachment_name: &str,
        attachment: Vec<u8>,
    ) -> Result<(), DispatchError>;
}

/// lettre-backed SMTP mailer.
pub struct SmtpMailer {
    config: MailerConfig,
}

impl SmtpMailer {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }

    fn build_message(
        &self,
        subject: &str,
        body: &str,
        attachment_name: &str,
        attachment: Vec<u8>,
    ) -> Result<Message, DispatchError> {
        let from: Mailbox = self.config.from_address.parse().map_err(|e| {
            DispatchError::InvalidAddress {
                address: self.config.from_address.clone(),
                reason: format!("{e}"),
            }
        })?;
        let to: Mailbox = self.config.receiver.parse().map_err(|e| {
            DispatchError::InvalidAddress {
                address: self.config.receiver.clone(),
                reason: format!("{e}"),
            }
        })?;

        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| DispatchError::EmailSend(format!("attachment content type: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body.to_string()))
                    .singlepart(
                        Attachment::new(attachment_name.to_string()).body(attachment, pdf_type),
                    ),
            )
            .map_err(|e| DispatchError::EmailSend(format!("failed to build email: {e}")))
    }
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send_report(
        &self,
        subject: &str,
        body: &str,
        attachment_name: &str,
        attachment: Vec<u8>,
    ) -> Result<(), DispatchError> {
        let email = self.build_message(subject, body, attachment_name, attachment)?;

        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.expose_secret().to_string(),
        );
        let transport = SmtpTransport::starttls_relay(&self.config.smtp_host)
            .map_err(|e| DispatchError::EmailSend(format!("SMTP relay error: {e}")))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();

        transport
            .send(&email)
            .map_err(|e| DispatchError::EmailSend(format!("SMTP send failed: {e}")))?;

        tracing::info!(to = %self.config.receiver, "Report email sent");
        Ok(())
    }
}
