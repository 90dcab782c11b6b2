use crate::services::WEBHOOK_TIMEOUT;
use tracing::{info, warn};
use wellness_scheduler_utils::create_random_secret;

const DEFAULT_PORT: usize = 5000;
const DEFAULT_POPUP_DELIVERY_LEASE_SECS: i64 = 5 * 60;

#[derive(Debug, Clone)]
pub struct PopupWebhookSettings {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret the external scheduler must send in the
    /// `wellness-trigger-key` header to start a lifecycle run
    pub lifecycle_trigger_key: String,
    /// When set, the server also runs the lifecycle processor by itself
    /// with this interval in seconds
    pub lifecycle_job_interval_secs: Option<u64>,
    /// Where `PopupCampaign` activation notifications are posted.
    /// Notifications are only logged when this is missing.
    pub popup_webhook: Option<PopupWebhookSettings>,
    /// How long in millis a lifecycle run owns a `PopupCampaign` while it
    /// delivers the activation notification
    pub popup_delivery_lease_millis: i64,
}

impl Config {
    pub fn new() -> Self {
        let lifecycle_trigger_key = match std::env::var("LIFECYCLE_TRIGGER_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find LIFECYCLE_TRIGGER_KEY environment variable. Going to create one.");
                let key = create_random_secret(24);
                info!("Lifecycle trigger key was generated and set to: {}", key);
                key
            }
        };

        let port = parse_env("PORT").unwrap_or(DEFAULT_PORT);
        let lifecycle_job_interval_secs = parse_env::<u64>("LIFECYCLE_JOB_INTERVAL_SECS")
            .filter(|secs| {
                if *secs == 0 {
                    warn!("LIFECYCLE_JOB_INTERVAL_SECS must be positive, the lifecycle job is disabled.");
                }
                *secs > 0
            });
        let popup_delivery_lease_millis =
            popup_delivery_lease_millis(parse_env("POPUP_DELIVERY_LEASE_SECS"));

        Self {
            port,
            lifecycle_trigger_key,
            lifecycle_job_interval_secs,
            popup_webhook: popup_webhook_from_env(),
            popup_delivery_lease_millis,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default.",
                name, value
            );
            None
        }
    }
}

/// Delivery claims must outlive the slowest webhook call
fn popup_delivery_lease_millis(lease_secs: Option<i64>) -> i64 {
    let min_secs = 2 * WEBHOOK_TIMEOUT.as_secs() as i64;
    let secs = match lease_secs {
        None => DEFAULT_POPUP_DELIVERY_LEASE_SECS,
        Some(secs) if secs < min_secs => {
            warn!(
                "The given POPUP_DELIVERY_LEASE_SECS: {} is shorter than twice the webhook timeout, using {} seconds.",
                secs, min_secs
            );
            min_secs
        }
        Some(secs) => secs,
    };
    secs * 1000
}

fn popup_webhook_from_env() -> Option<PopupWebhookSettings> {
    let url = std::env::var("POPUP_WEBHOOK_URL").ok()?;
    if !is_valid_webhook_url(&url) {
        warn!(
            "The given POPUP_WEBHOOK_URL: {} is not a valid http(s) url. Popup notifications will only be logged.",
            url
        );
        return None;
    }
    let key = match std::env::var("POPUP_WEBHOOK_KEY") {
        Ok(key) => key,
        Err(_) => {
            let key = create_random_secret(30);
            info!("Popup webhook key was generated and set to: {}", key);
            key
        }
    };
    Some(PopupWebhookSettings { url, key })
}

pub(crate) fn is_valid_webhook_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed_url) => {
            let allowed_schemes = ["https", "http"];
            allowed_schemes.contains(&parsed_url.scheme())
        }
        Err(_) => false,
    }
}
