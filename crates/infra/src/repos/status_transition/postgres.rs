use super::IStatusTransitionRepo;
use anyhow::bail;
use sqlx::PgPool;
use tracing::info;
use wellness_scheduler_domain::{LifecycleStatus, StatusTransition};

const PLAN_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM indulgence_plans WHERE plan_uid = $1)";
const POPUP_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM popup_campaigns WHERE popup_uid = $1)";

pub struct PostgresStatusTransitionRepo {
    pool: PgPool,
}

impl PostgresStatusTransitionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IStatusTransitionRepo for PostgresStatusTransitionRepo {
    async fn apply_all(
        &self,
        transitions: &[StatusTransition],
        ts: i64,
    ) -> anyhow::Result<Vec<StatusTransition>> {
        // Dropping the transaction without commit rolls it back
        let mut tx = self.pool.begin().await?;
        let mut applied = Vec::with_capacity(transitions.len());

        for transition in transitions {
            let (res, exists_query) = match transition {
                StatusTransition::Plan { plan_id, from, to } => {
                    let res = sqlx::query(
                        r#"
                        UPDATE indulgence_plans
                        SET status = $3, updated = $4
                        WHERE plan_uid = $1 AND status = $2
                        "#,
                    )
                    .bind(plan_id.inner_ref())
                    .bind(from.as_str())
                    .bind(to.as_str())
                    .bind(ts)
                    .execute(&mut *tx)
                    .await?;
                    (res, PLAN_EXISTS)
                }
                StatusTransition::Popup {
                    popup_id,
                    from,
                    to,
                    notified_at,
                } => {
                    let res = sqlx::query(
                        r#"
                        UPDATE popup_campaigns
                        SET status = $3,
                            notified_at = COALESCE($4, notified_at),
                            delivery_claimed_until = NULL,
                            updated = $5
                        WHERE popup_uid = $1 AND status = $2
                        "#,
                    )
                    .bind(popup_id.inner_ref())
                    .bind(from.as_str())
                    .bind(to.as_str())
                    .bind(*notified_at)
                    .bind(ts)
                    .execute(&mut *tx)
                    .await?;
                    (res, POPUP_EXISTS)
                }
            };

            if res.rows_affected() == 1 {
                applied.push(transition.clone());
                continue;
            }

            let exists: bool = sqlx::query_scalar(exists_query)
                .bind(transition.document_id().inner_ref())
                .fetch_one(&mut *tx)
                .await?;
            if !exists {
                bail!("Document: {} was not found", transition.document_id());
            }
            info!(
                document_id = %transition.document_id(),
                "Transition was already applied by another run, skipping"
            );
        }

        tx.commit().await?;
        Ok(applied)
    }
}
