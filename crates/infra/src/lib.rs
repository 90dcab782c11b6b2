mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, PopupWebhookSettings};
pub use repos::{IIndulgencePlanRepo, IPopupCampaignRepo, IStatusTransitionRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct WellnessContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn IPopupNotifier>,
}

impl WellnessContext {
    /// Context backed by the in-memory store
    pub fn create_inmemory() -> Self {
        Self::create(Repos::create_inmemory(), Config::new())
    }

    fn create(repos: Repos, config: Config) -> Self {
        let notifier: Arc<dyn IPopupNotifier> = match &config.popup_webhook {
            Some(settings) => Arc::new(WebhookPopupNotifier::new(settings.clone())),
            None => Arc::new(LogPopupNotifier),
        };
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<WellnessContext> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    let config = Config::new();
    let repos = match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => Repos::create_postgres(&connection_string).await?,
        Err(_) => {
            tracing::warn!(
                "{} env var not present, documents are kept in memory.",
                PSQL_CONNECTION_STRING
            );
            Repos::create_inmemory()
        }
    };

    Ok(WellnessContext::create(repos, config))
}
