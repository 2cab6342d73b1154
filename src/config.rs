//! Service configuration, built once from environment variables.
//!
//! Every component receives its settings through [`DispatchConfig`] —
//! nothing reads process state after startup. Missing credentials are
//! fatal and reported verbatim to the caller.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Full configuration for one dispatch service instance.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Fixed start/end location for the day's route.
    pub depot_address: String,
    /// Report and SMS title, e.g. "Plan dnia – ENERTIA".
    pub report_title: String,

    /// Google Calendar id to read the day's events from.
    pub calendar_id: String,
    /// OAuth bearer token for the Calendar API.
    pub google_token: SecretString,

    /// MSISDNs that receive the SMS summary, in send order.
    pub sms_recipients: Vec<String>,
    /// JustSend application key.
    pub sms_app_key: SecretString,
    /// SMS sender field.
    pub sms_sender: String,
    /// JustSend bulk variant.
    pub sms_variant: String,

    pub smtp_host: String,
    pub smtp_port: u16,
    pub email_login: String,
    pub email_password: SecretString,
    /// Manager address that receives the PDF report.
    pub email_receiver: String,
    pub email_from: String,

    /// HTTP port for the trigger endpoint.
    pub http_port: u16,
}

impl DispatchConfig {
    /// Build config from environment variables.
    ///
    /// Required: `DEPOT_ADDRESS`, `GOOGLE_ACCESS_TOKEN`, `GOOGLE_CALENDAR_ID`,
    /// `SMS_RECIPIENTS`, `SMS_APP_KEY`, `EMAIL_LOGIN`, `EMAIL_PASSWORD`,
    /// `EMAIL_RECEIVER`. Everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let depot_address = required("DEPOT_ADDRESS")?;
        let report_title =
            std::env::var("REPORT_TITLE").unwrap_or_else(|_| "Plan dnia".to_string());

        let calendar_id = required("GOOGLE_CALENDAR_ID")?;
        let google_token = SecretString::from(required("GOOGLE_ACCESS_TOKEN")?);

        let sms_recipients: Vec<String> = required("SMS_RECIPIENTS")?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if sms_recipients.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "SMS_RECIPIENTS".into(),
                message: "expected a comma-separated list of phone numbers".into(),
            });
        }
        let sms_app_key = SecretString::from(required("SMS_APP_KEY")?);
        let sms_sender = std::env::var("SMS_SENDER").unwrap_or_else(|_| "WEB".to_string());
        let sms_variant = std::env::var("SMS_VARIANT").unwrap_or_else(|_| "PRO".to_string());

        let smtp_host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let smtp_port = parse_or("SMTP_PORT", 587)?;
        let email_login = required("EMAIL_LOGIN")?;
        let email_password = SecretString::from(required("EMAIL_PASSWORD")?);
        let email_receiver = required("EMAIL_RECEIVER")?;
        let email_from =
            std::env::var("EMAIL_FROM").unwrap_or_else(|_| email_login.clone());

        let http_port = parse_or("PORT", 5000)?;

        Ok(Self {
            depot_address,
            report_title,
            calendar_id,
            google_token,
            sms_recipients,
            sms_app_key,
            sms_sender,
            sms_variant,
            smtp_host,
            smtp_port,
            email_login,
            email_password,
            email_receiver,
            email_from,
            http_port,
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn parse_or(key: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a port number, got {raw:?}"),
        }),
    }
}
