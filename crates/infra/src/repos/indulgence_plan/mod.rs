mod inmemory;
mod postgres;

pub use inmemory::InMemoryIndulgencePlanRepo;
pub use postgres::PostgresIndulgencePlanRepo;
use wellness_scheduler_domain::{IndulgencePlan, PlanStatus, ID};

#[async_trait::async_trait]
pub trait IIndulgencePlanRepo: Send + Sync {
    async fn insert(&self, plan: &IndulgencePlan) -> anyhow::Result<()>;
    async fn find(&self, plan_id: &ID) -> anyhow::Result<Option<IndulgencePlan>>;
    /// Plans with the given status and an `indulgence_date` at or before `before_inc`
    async fn find_by_status_before(
        &self,
        status: PlanStatus,
        before_inc: i64,
    ) -> anyhow::Result<Vec<IndulgencePlan>>;
}
