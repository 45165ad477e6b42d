use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::ProviderResponse;

use crate::config::EmailConfig;

/// Message handed to the transactional email provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Sends one message. Failures are reported in the response body, never retried.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> ProviderResponse;

    fn is_configured(&self) -> bool;
}

/// Resend-compatible HTTP API client
pub struct ResendProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ResendAccepted {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
    name: Option<String>,
}

impl ResendProvider {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send(&self, email: &OutboundEmail) -> ProviderResponse {
        let Some(api_key) = &self.api_key else {
            tracing::warn!("Email provider API key is missing; not sending to {:?}", email.to);
            return ProviderResponse::failed("Missing API key");
        };

        let response = match self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Email provider request failed: {}", e);
                return ProviderResponse::failed(e.to_string());
            }
        };

        let status = response.status();
        if status.is_success() {
            match response.json::<ResendAccepted>().await {
                Ok(accepted) => ProviderResponse::accepted(accepted.id),
                Err(e) => ProviderResponse::failed(format!("Unreadable provider response: {}", e)),
            }
        } else {
            let body = response.json::<ResendErrorBody>().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.message.clone())
                .unwrap_or_else(|| format!("Provider responded with {}", status));
            tracing::warn!("Email provider rejected message: {}", message);
            let mut failed = ProviderResponse::failed(message);
            if let Some(error) = failed.error.as_mut() {
                error.name = body.and_then(|b| b.name);
            }
            failed
        }
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
