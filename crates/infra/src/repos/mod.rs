mod indulgence_plan;
mod popup;
mod shared;
mod status_transition;

pub use indulgence_plan::IIndulgencePlanRepo;
use indulgence_plan::{InMemoryIndulgencePlanRepo, PostgresIndulgencePlanRepo};
pub use popup::IPopupCampaignRepo;
use popup::{InMemoryPopupCampaignRepo, PostgresPopupCampaignRepo};
use shared::inmemory_repo::new_collection;
use sqlx::postgres::PgPoolOptions;
pub use status_transition::IStatusTransitionRepo;
use status_transition::{InMemoryStatusTransitionRepo, PostgresStatusTransitionRepo};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub indulgence_plans: Arc<dyn IIndulgencePlanRepo>,
    pub popups: Arc<dyn IPopupCampaignRepo>,
    /// Grouped write of staged lifecycle transitions
    pub status_transitions: Arc<dyn IStatusTransitionRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        info!("DB CHECKING CONNECTION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            indulgence_plans: Arc::new(PostgresIndulgencePlanRepo::new(pool.clone())),
            popups: Arc::new(PostgresPopupCampaignRepo::new(pool.clone())),
            status_transitions: Arc::new(PostgresStatusTransitionRepo::new(pool)),
        })
    }

    /// The grouped write locks the same collections the entity repos read from
    pub fn create_inmemory() -> Self {
        let plans = new_collection();
        let popups = new_collection();
        Self {
            indulgence_plans: Arc::new(InMemoryIndulgencePlanRepo::new(plans.clone())),
            popups: Arc::new(InMemoryPopupCampaignRepo::new(popups.clone())),
            status_transitions: Arc::new(InMemoryStatusTransitionRepo::new(plans, popups)),
        }
    }
}
