//! Error types for the dispatch service.
//!
//! Taxonomy mirrors the failure model: configuration problems are fatal
//! and surfaced verbatim; collaborator hard failures (calendar fetch, SMS
//! transport, SMTP) abort the run; the link shortener is the one
//! collaborator whose failure is recovered locally and never reaches here.

/// Top-level error type for the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Report rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Calendar collaborator errors — always hard failures.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Calendar request failed: {0}")]
    Http(String),

    #[error("Calendar API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid calendar response: {0}")]
    InvalidResponse(String),
}

/// Report rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(e: lopdf::Error) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

/// Outbound delivery errors (SMS gateway, SMTP) — always hard failures.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("SMS send to {recipient} failed: {reason}")]
    SmsSend { recipient: String, reason: String },

    #[error("Email send failed: {0}")]
    EmailSend(String),

    #[error("Invalid mail address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
}

/// Link-shortener failure. Recovered by the caller with the full URL;
/// kept as a named type so the fallback branch is directly testable.
#[derive(Debug, thiserror::Error)]
#[error("Link shortening failed: {0}")]
pub struct ShortenError(pub String);

/// Result type alias for the pipeline.
pub type Result<T> = std::result::Result<T, Error>;
