//! Outbound channels: message composition, SMS gateway, report mailer.

pub mod compose;
pub mod email;
pub mod sms;

pub use email::{EmailSender, MailerConfig, SmtpMailer};
pub use sms::{JustSendGateway, SmsGateway};
