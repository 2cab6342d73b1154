//! SMS delivery via the JustSend gateway.
//!
//! Transport failures are hard errors; a non-2xx gateway status is not —
//! it lands in the per-recipient status string, matching how the gateway
//! reports partial trouble.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::DispatchError;

const JUSTSEND_SEND_URL: &str = "https://justsend.io/api/sender/singlemessage/send";

/// SMS-sending collaborator: one message to one MSISDN, returns the
/// gateway's delivery status code.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, msisdn: &str, content: &str) -> Result<u16, DispatchError>;
}

/// Send the body to every recipient in configured order and aggregate the
/// statuses into one human-readable string, one entry per destination.
pub async fn send_to_all(
    gateway: &dyn SmsGateway,
    recipients: &[String],
    body: &str,
) -> Result<String, DispatchError> {
    let mut statuses = Vec::with_capacity(recipients.len());
    for msisdn in recipients {
        let status = gateway.send(msisdn, body).await?;
        tracing::info!(recipient = %msisdn, status, "SMS dispatched");
        statuses.push(format!("{msisdn}: {status}"));
    }
    Ok(statuses.join(", "))
}

// ── JustSend client ─────────────────────────────────────────────────

/// JustSend single-message API client.
pub struct JustSendGateway {
    client: reqwest::Client,
    app_key: SecretString,
    sender: String,
    variant: String,
}

impl JustSendGateway {
    pub fn new(app_key: SecretString, sender: String, variant: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            app_key,
            sender,
            variant,
        }
    }
}

#[async_trait]
impl SmsGateway for JustSendGateway {
    async fn send(&self, msisdn: &str, content: &str) -> Result<u16, DispatchError> {
        let payload = serde_json::json!({
            "sender": self.sender,
            "msisdn": msisdn,
            "bulkVariant": self.variant,
            "content": content,
        });

        let response = self
            .client
            .post(JUSTSEND_SEND_URL)
            .header("App-Key", self.app_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| DispatchError::SmsSend {
                recipient: msisdn.to_string(),
                reason: e.to_string(),
            })?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedGateway {
        statuses: Vec<Result<u16, String>>,
        calls: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SmsGateway for ScriptedGateway {
        async fn send(&self, msisdn: &str, _content: &str) -> Result<u16, DispatchError> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(msisdn.to_string());
            self.statuses[index]
                .clone()
                .map_err(|reason| DispatchError::SmsSend {
                    recipient: msisdn.to_string(),
                    reason,
                })
        }
    }

    #[tokio::test]
    async fn aggregates_statuses_in_recipient_order() {
        let gateway = ScriptedGateway {
            statuses: vec![Ok(200), Ok(403)],
            calls: Default::default(),
        };
        let recipients = vec!["48600100200".to_string(), "48600100201".to_string()];
        let status = send_to_all(&gateway, &recipients, "tresc").await.unwrap();
        assert_eq!(status, "48600100200: 200, 48600100201: 403");
        assert_eq!(*gateway.calls.lock().unwrap(), recipients);
    }

    #[tokio::test]
    async fn transport_failure_aborts_the_batch() {
        let gateway = ScriptedGateway {
            statuses: vec![Ok(200), Err("connection reset".into())],
            calls: Default::default(),
        };
        let recipients = vec!["48600100200".to_string(), "48600100201".to_string()];
        let err = send_to_all(&gateway, &recipients, "tresc").await.unwrap_err();
        match err {
            DispatchError::SmsSend { recipient, .. } => {
                assert_eq!(recipient, "48600100201");
            }
            other => panic!("Expected SmsSend, got {other:?}"),
        }
    }
}
