//! Webhook delivery of the rendered notification

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivery primitive for a single webhook endpoint.
///
/// Abstracted so dispatch ordering and fail-fast behavior can be tested
/// without a live endpoint.
pub trait WebhookSink: Send + Sync {
    /// Deliver `message` to the webhook at `url`
    fn post(&self, url: &str, message: &str) -> Result<()>;
}

/// Real webhook delivery over HTTP
pub struct SlackWebhook {
    http: Client,
}

impl SlackWebhook {
    pub fn new() -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(SlackWebhook { http })
    }
}

impl WebhookSink for SlackWebhook {
    fn post(&self, url: &str, message: &str) -> Result<()> {
        self.http
            .post(url)
            .json(&serde_json::json!({ "text": message }))
            .send()?
            .error_for_status()?;

        Ok(())
    }
}

/// Deliver the message to every configured webhook, in list order.
///
/// Each delivery is an independent fail point: the first failure aborts the
/// loop and propagates, leaving later endpoints uncontacted. Earlier
/// successful deliveries are not reported separately or rolled back.
pub fn send_to_all(sink: &dyn WebhookSink, urls: &[String], message: &str) -> Result<()> {
    for url in urls {
        tracing::info!("Sending release notification to webhook");
        sink.post(url, message)?;
    }

    Ok(())
}
