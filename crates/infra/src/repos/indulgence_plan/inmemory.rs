use super::IIndulgencePlanRepo;
use crate::repos::shared::inmemory_repo::*;
use wellness_scheduler_domain::{IndulgencePlan, PlanStatus, ID};

pub struct InMemoryIndulgencePlanRepo {
    plans: Collection<IndulgencePlan>,
}

impl InMemoryIndulgencePlanRepo {
    pub fn new(plans: Collection<IndulgencePlan>) -> Self {
        Self { plans }
    }
}

#[async_trait::async_trait]
impl IIndulgencePlanRepo for InMemoryIndulgencePlanRepo {
    async fn insert(&self, plan: &IndulgencePlan) -> anyhow::Result<()> {
        insert(plan, &self.plans);
        Ok(())
    }

    async fn find(&self, plan_id: &ID) -> anyhow::Result<Option<IndulgencePlan>> {
        Ok(find(plan_id, &self.plans))
    }

    async fn find_by_status_before(
        &self,
        status: PlanStatus,
        before_inc: i64,
    ) -> anyhow::Result<Vec<IndulgencePlan>> {
        Ok(find_by(&self.plans, |plan| {
            plan.status == status && plan.indulgence_date <= before_inc
        }))
    }
}
