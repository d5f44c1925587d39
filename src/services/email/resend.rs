use async_trait::async_trait;
use serde_json::json;

use super::{EmailTransport, SEND_TIMEOUT};
use crate::errors::TransportError;
use crate::models::OutgoingEmail;

pub struct ResendTransport {
    api_key: String,
    base_url: String,
    from: String,
    client: reqwest::Client,
}

impl ResendTransport {
    pub fn new(api_key: String, base_url: String, from: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            from,
            client,
        })
    }

    fn payload(&self, email: &OutgoingEmail) -> serde_json::Value {
        let mut body = json!({
            "from": self.from,
            "to": [email.to],
            "subject": email.subject,
            "html": email.html,
        });
        if let Some(reply_to) = &email.reply_to {
            body["reply_to"] = json!(reply_to);
        }
        body
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        if self.api_key.is_empty() {
            return Err(TransportError::MissingCredentials(
                "RESEND_API_KEY".to_string(),
            ));
        }

        let body = self.payload(email);

        let resp = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let data: serde_json::Value = resp.json().await.unwrap_or_default();
        tracing::debug!(to = %email.to, id = %data["id"], "Resend accepted message");

        Ok(())
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}
