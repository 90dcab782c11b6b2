mod inmemory;
mod postgres;

pub use inmemory::InMemoryPopupCampaignRepo;
pub use postgres::PostgresPopupCampaignRepo;
use wellness_scheduler_domain::{PopupCampaign, PopupStatus, ID};

#[async_trait::async_trait]
pub trait IPopupCampaignRepo: Send + Sync {
    async fn insert(&self, popup: &PopupCampaign) -> anyhow::Result<()>;
    async fn find(&self, popup_id: &ID) -> anyhow::Result<Option<PopupCampaign>>;
    /// Campaigns with the given status and a `scheduled_at` at or before `before_inc`
    async fn find_by_status_before(
        &self,
        status: PopupStatus,
        before_inc: i64,
    ) -> anyhow::Result<Vec<PopupCampaign>>;
    /// Takes ownership of delivering the activation notification until `claim_until`.
    /// Only succeeds for a `Scheduled` campaign without an unexpired claim at `now`,
    /// and returns the campaign as stored after the claim.
    async fn claim_delivery(
        &self,
        popup_id: &ID,
        now: i64,
        claim_until: i64,
    ) -> anyhow::Result<Option<PopupCampaign>>;
    /// Records that the activation notification was sent at `ts`.
    /// Returns false when the campaign is no longer `Scheduled` or was already marked.
    async fn mark_notified(&self, popup_id: &ID, ts: i64) -> anyhow::Result<bool>;
    /// Gives up the claim ending at `claim_until` so the next lifecycle run can
    /// retry the delivery. A claim taken over by another run is left alone.
    async fn release_delivery(&self, popup_id: &ID, claim_until: i64) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::Repos;
    use wellness_scheduler_domain::{PopupCampaign, PopupStatus, ID};

    fn popup_factory(scheduled_at: i64) -> PopupCampaign {
        PopupCampaign::new(
            "Hydration challenge".into(),
            "Drink 8 glasses today".into(),
            scheduled_at,
            0,
        )
    }

    #[tokio::test]
    async fn create_and_find() {
        let repos = Repos::create_inmemory();
        let popup = popup_factory(500);
        repos.popups.insert(&popup).await.unwrap();

        assert_eq!(repos.popups.find(&popup.id).await.unwrap(), Some(popup.clone()));
        assert_eq!(
            repos
                .popups
                .find_by_status_before(PopupStatus::Scheduled, 499)
                .await
                .unwrap(),
            vec![]
        );
        assert_eq!(
            repos
                .popups
                .find_by_status_before(PopupStatus::Scheduled, 500)
                .await
                .unwrap(),
            vec![popup]
        );
    }

    #[tokio::test]
    async fn delivery_claim_is_exclusive_until_expired_or_released() {
        let repos = Repos::create_inmemory();
        let popup = popup_factory(0);
        repos.popups.insert(&popup).await.unwrap();

        let claimed = repos.popups.claim_delivery(&popup.id, 10, 100).await.unwrap();
        assert_eq!(claimed.unwrap().delivery_claimed_until, Some(100));
        assert!(repos
            .popups
            .claim_delivery(&popup.id, 50, 150)
            .await
            .unwrap()
            .is_none());
        // Expired
        assert!(repos
            .popups
            .claim_delivery(&popup.id, 100, 200)
            .await
            .unwrap()
            .is_some());

        repos.popups.release_delivery(&popup.id, 200).await.unwrap();
        let stored = repos.popups.find(&popup.id).await.unwrap().unwrap();
        assert_eq!(stored.delivery_claimed_until, None);
        assert!(repos
            .popups
            .claim_delivery(&popup.id, 101, 300)
            .await
            .unwrap()
            .is_some());

        assert!(repos
            .popups
            .claim_delivery(&ID::new(), 0, 100)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn release_keeps_a_claim_taken_over_by_another_run() {
        let repos = Repos::create_inmemory();
        let popup = popup_factory(0);
        repos.popups.insert(&popup).await.unwrap();

        // First run's claim expires while it is still sending
        repos.popups.claim_delivery(&popup.id, 0, 100).await.unwrap();
        repos.popups.claim_delivery(&popup.id, 100, 200).await.unwrap();

        repos.popups.release_delivery(&popup.id, 100).await.unwrap();
        let stored = repos.popups.find(&popup.id).await.unwrap().unwrap();
        assert_eq!(stored.delivery_claimed_until, Some(200));
        assert!(repos
            .popups
            .claim_delivery(&popup.id, 150, 250)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn notified_marker_is_written_once() {
        let repos = Repos::create_inmemory();
        let popup = popup_factory(0);
        repos.popups.insert(&popup).await.unwrap();

        assert!(repos.popups.mark_notified(&popup.id, 10).await.unwrap());
        assert!(!repos.popups.mark_notified(&popup.id, 20).await.unwrap());

        // Visible to the next run claiming the campaign
        let claimed = repos.popups.claim_delivery(&popup.id, 30, 100).await.unwrap();
        assert_eq!(claimed.unwrap().notified_at, Some(10));
    }

    #[tokio::test]
    async fn only_scheduled_campaigns_can_be_claimed() {
        let repos = Repos::create_inmemory();
        let mut popup = popup_factory(0);
        popup.status = PopupStatus::Active;
        repos.popups.insert(&popup).await.unwrap();

        assert!(repos
            .popups
            .claim_delivery(&popup.id, 0, 100)
            .await
            .unwrap()
            .is_none());
        assert!(!repos.popups.mark_notified(&popup.id, 0).await.unwrap());
    }
}
