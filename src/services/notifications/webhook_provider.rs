//! Webhook notifier implementation.
//!
//! Posts each notification as JSON to a single configured URL.

use super::provider::Notifier;
use crate::config::settings::WebhookSettings;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use std::time::{Duration, Instant};

/// JSON body posted to the webhook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    user_id: &'a str,
    message: &'a str,
}

/// Webhook notifier
///
/// # Example
/// ```ignore
/// let settings = WebhookSettings {
///     url: "https://example.com/notify".to_string(),
///     timeout_seconds: 5,
/// };
/// let notifier = WebhookNotifier::new(&settings)?;
/// notifier.send("ID_LANDLORD_1", "Your reservation has been cancelled").await?;
/// ```
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Url,
}

impl WebhookNotifier {
    /// Creates a webhook notifier from settings
    ///
    /// # Errors
    /// Returns a configuration error when the URL is not a valid http(s) URL
    /// or the HTTP client cannot be built.
    pub fn new(settings: &WebhookSettings) -> AppResult<Self> {
        let url = Url::parse(&settings.url).map_err(|e| AppError::Configuration {
            key: "notifications.webhook.url".to_string(),
            source: anyhow::Error::new(e),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Configuration {
                key: "notifications.webhook.url".to_string(),
                source: anyhow::anyhow!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration {
                key: "notifications.webhook".to_string(),
                source: anyhow::Error::new(e),
            })?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, user_id: &str, message: &str) -> AppResult<()> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.url.clone())
            .json(&WebhookPayload { user_id, message })
            .send()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::new(e).context("webhook request failed"),
            })?;

        let status = response.status();
        tracing::debug!(
            user_id = %user_id,
            status = %status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "Webhook notification delivered"
        );

        if !status.is_success() {
            return Err(AppError::Internal {
                source: anyhow::anyhow!("webhook responded with status {}", status),
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
