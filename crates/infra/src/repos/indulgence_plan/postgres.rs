use super::IIndulgencePlanRepo;
use std::convert::{TryFrom, TryInto};
use sqlx::{types::Uuid, FromRow, PgPool};
use wellness_scheduler_domain::{IndulgencePlan, PlanStatus, ID};

pub struct PostgresIndulgencePlanRepo {
    pool: PgPool,
}

impl PostgresIndulgencePlanRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IndulgencePlanRaw {
    plan_uid: Uuid,
    user_uid: Uuid,
    title: String,
    status: String,
    indulgence_date: i64,
    created: i64,
    updated: i64,
}

impl TryFrom<IndulgencePlanRaw> for IndulgencePlan {
    type Error = anyhow::Error;

    fn try_from(raw: IndulgencePlanRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.plan_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            status: raw.status.parse()?,
            indulgence_date: raw.indulgence_date,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

#[async_trait::async_trait]
impl IIndulgencePlanRepo for PostgresIndulgencePlanRepo {
    async fn insert(&self, plan: &IndulgencePlan) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO indulgence_plans
            (plan_uid, user_uid, title, status, indulgence_date, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(plan.id.inner_ref())
        .bind(plan.user_id.inner_ref())
        .bind(&plan.title)
        .bind(plan.status.to_string())
        .bind(plan.indulgence_date)
        .bind(plan.created)
        .bind(plan.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, plan_id: &ID) -> anyhow::Result<Option<IndulgencePlan>> {
        let plan: Option<IndulgencePlanRaw> = sqlx::query_as(
            r#"
            SELECT * FROM indulgence_plans AS p
            WHERE p.plan_uid = $1
            "#,
        )
        .bind(plan_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        plan.map(|p| p.try_into()).transpose()
    }

    async fn find_by_status_before(
        &self,
        status: PlanStatus,
        before_inc: i64,
    ) -> anyhow::Result<Vec<IndulgencePlan>> {
        let plans: Vec<IndulgencePlanRaw> = sqlx::query_as(
            r#"
            SELECT * FROM indulgence_plans AS p
            WHERE p.status = $1 AND p.indulgence_date <= $2
            "#,
        )
        .bind(status.to_string())
        .bind(before_inc)
        .fetch_all(&self.pool)
        .await?;

        plans.into_iter().map(|p| p.try_into()).collect()
    }
}
