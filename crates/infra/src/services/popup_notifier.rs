use crate::config::PopupWebhookSettings;
use anyhow::bail;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::info;
use wellness_scheduler_domain::{PopupCampaign, PopupStatus, ID};

const WEBHOOK_KEY_HEADER: &str = "wellness-webhook-key";
pub(crate) const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers the notification that a `PopupCampaign` went live
#[async_trait::async_trait]
pub trait IPopupNotifier: Send + Sync {
    async fn send_scheduled_popup_notification(&self, popup: &PopupCampaign) -> anyhow::Result<()>;
}

/// The full campaign document as sent to the delivery webhook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPopupNotification<'a> {
    pub id: &'a ID,
    pub name: &'a str,
    pub body: &'a str,
    pub status: PopupStatus,
    pub scheduled_at: i64,
    pub created: i64,
    pub updated: i64,
}

impl<'a> ScheduledPopupNotification<'a> {
    pub fn new(popup: &'a PopupCampaign) -> Self {
        Self {
            id: &popup.id,
            name: &popup.name,
            body: &popup.body,
            status: popup.status,
            scheduled_at: popup.scheduled_at,
            created: popup.created,
            updated: popup.updated,
        }
    }
}

pub struct WebhookPopupNotifier {
    client: Client,
    settings: PopupWebhookSettings,
}

impl WebhookPopupNotifier {
    pub fn new(settings: PopupWebhookSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }
}

#[async_trait::async_trait]
impl IPopupNotifier for WebhookPopupNotifier {
    async fn send_scheduled_popup_notification(&self, popup: &PopupCampaign) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.settings.url)
            .header(WEBHOOK_KEY_HEADER, &self.settings.key)
            .timeout(WEBHOOK_TIMEOUT)
            .json(&ScheduledPopupNotification::new(popup))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            bail!(
                "Popup webhook responded with status code: {} for popup: {}",
                status,
                popup.id
            );
        }
        Ok(())
    }
}

/// Used when no delivery webhook is configured
pub struct LogPopupNotifier;

#[async_trait::async_trait]
impl IPopupNotifier for LogPopupNotifier {
    async fn send_scheduled_popup_notification(&self, popup: &PopupCampaign) -> anyhow::Result<()> {
        info!(
            popup_id = %popup.id,
            name = %popup.name,
            "Popup campaign went live, no webhook configured"
        );
        Ok(())
    }
}
