use super::IPopupCampaignRepo;
use crate::repos::shared::inmemory_repo::*;
use wellness_scheduler_domain::{PopupCampaign, PopupStatus, ID};

pub struct InMemoryPopupCampaignRepo {
    popups: Collection<PopupCampaign>,
}

impl InMemoryPopupCampaignRepo {
    pub fn new(popups: Collection<PopupCampaign>) -> Self {
        Self { popups }
    }
}

#[async_trait::async_trait]
impl IPopupCampaignRepo for InMemoryPopupCampaignRepo {
    async fn insert(&self, popup: &PopupCampaign) -> anyhow::Result<()> {
        insert(popup, &self.popups);
        Ok(())
    }

    async fn find(&self, popup_id: &ID) -> anyhow::Result<Option<PopupCampaign>> {
        Ok(find(popup_id, &self.popups))
    }

    async fn find_by_status_before(
        &self,
        status: PopupStatus,
        before_inc: i64,
    ) -> anyhow::Result<Vec<PopupCampaign>> {
        Ok(find_by(&self.popups, |popup| {
            popup.status == status && popup.scheduled_at <= before_inc
        }))
    }

    async fn claim_delivery(
        &self,
        popup_id: &ID,
        now: i64,
        claim_until: i64,
    ) -> anyhow::Result<Option<PopupCampaign>> {
        let claimed = update_if(
            popup_id,
            &self.popups,
            |popup| popup.status == PopupStatus::Scheduled && !popup.is_delivery_claimed(now),
            |popup| popup.delivery_claimed_until = Some(claim_until),
        );
        Ok(if claimed {
            find(popup_id, &self.popups)
        } else {
            None
        })
    }

    async fn mark_notified(&self, popup_id: &ID, ts: i64) -> anyhow::Result<bool> {
        Ok(update_if(
            popup_id,
            &self.popups,
            |popup| popup.status == PopupStatus::Scheduled && popup.notified_at.is_none(),
            |popup| popup.notified_at = Some(ts),
        ))
    }

    async fn release_delivery(&self, popup_id: &ID, claim_until: i64) -> anyhow::Result<()> {
        update_if(
            popup_id,
            &self.popups,
            |popup| {
                popup.status == PopupStatus::Scheduled
                    && popup.delivery_claimed_until == Some(claim_until)
            },
            |popup| popup.delivery_claimed_until = None,
        );
        Ok(())
    }
}
