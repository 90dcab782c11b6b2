use super::IPopupCampaignRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use wellness_scheduler_domain::{PopupCampaign, PopupStatus, ID};

pub struct PostgresPopupCampaignRepo {
    pool: PgPool,
}

impl PostgresPopupCampaignRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PopupCampaignRaw {
    popup_uid: Uuid,
    name: String,
    body: String,
    status: String,
    scheduled_at: i64,
    delivery_claimed_until: Option<i64>,
    notified_at: Option<i64>,
    created: i64,
    updated: i64,
}

impl TryFrom<PopupCampaignRaw> for PopupCampaign {
    type Error = anyhow::Error;

    fn try_from(raw: PopupCampaignRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.popup_uid.into(),
            name: raw.name,
            body: raw.body,
            status: raw.status.parse()?,
            scheduled_at: raw.scheduled_at,
            delivery_claimed_until: raw.delivery_claimed_until,
            notified_at: raw.notified_at,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

#[async_trait::async_trait]
impl IPopupCampaignRepo for PostgresPopupCampaignRepo {
    async fn insert(&self, popup: &PopupCampaign) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO popup_campaigns
            (popup_uid, name, body, status, scheduled_at, delivery_claimed_until, notified_at, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(popup.id.inner_ref())
        .bind(&popup.name)
        .bind(&popup.body)
        .bind(popup.status.to_string())
        .bind(popup.scheduled_at)
        .bind(popup.delivery_claimed_until)
        .bind(popup.notified_at)
        .bind(popup.created)
        .bind(popup.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, popup_id: &ID) -> anyhow::Result<Option<PopupCampaign>> {
        let popup: Option<PopupCampaignRaw> = sqlx::query_as(
            r#"
            SELECT * FROM popup_campaigns AS p
            WHERE p.popup_uid = $1
            "#,
        )
        .bind(popup_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        popup.map(|p| p.try_into()).transpose()
    }

    async fn find_by_status_before(
        &self,
        status: PopupStatus,
        before_inc: i64,
    ) -> anyhow::Result<Vec<PopupCampaign>> {
        let popups: Vec<PopupCampaignRaw> = sqlx::query_as(
            r#"
            SELECT * FROM popup_campaigns AS p
            WHERE p.status = $1 AND p.scheduled_at <= $2
            "#,
        )
        .bind(status.to_string())
        .bind(before_inc)
        .fetch_all(&self.pool)
        .await?;

        popups.into_iter().map(|p| p.try_into()).collect()
    }

    async fn claim_delivery(
        &self,
        popup_id: &ID,
        now: i64,
        claim_until: i64,
    ) -> anyhow::Result<Option<PopupCampaign>> {
        let popup: Option<PopupCampaignRaw> = sqlx::query_as(
            r#"
            UPDATE popup_campaigns
            SET delivery_claimed_until = $3
            WHERE popup_uid = $1
                AND status = 'scheduled'
                AND (delivery_claimed_until IS NULL OR delivery_claimed_until <= $2)
            RETURNING *
            "#,
        )
        .bind(popup_id.inner_ref())
        .bind(now)
        .bind(claim_until)
        .fetch_optional(&self.pool)
        .await?;

        popup.map(|p| p.try_into()).transpose()
    }

    async fn mark_notified(&self, popup_id: &ID, ts: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE popup_campaigns
            SET notified_at = $2
            WHERE popup_uid = $1
                AND status = 'scheduled'
                AND notified_at IS NULL
            "#,
        )
        .bind(popup_id.inner_ref())
        .bind(ts)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn release_delivery(&self, popup_id: &ID, claim_until: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE popup_campaigns
            SET delivery_claimed_until = NULL
            WHERE popup_uid = $1
                AND status = 'scheduled'
                AND delivery_claimed_until = $2
            "#,
        )
        .bind(popup_id.inner_ref())
        .bind(claim_until)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
