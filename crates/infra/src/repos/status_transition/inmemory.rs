use super::IStatusTransitionRepo;
use crate::repos::shared::inmemory_repo::{lock, Collection};
use anyhow::anyhow;
use tracing::info;
use wellness_scheduler_domain::{IndulgencePlan, PopupCampaign, StatusTransition, ID};

pub struct InMemoryStatusTransitionRepo {
    plans: Collection<IndulgencePlan>,
    popups: Collection<PopupCampaign>,
}

impl InMemoryStatusTransitionRepo {
    pub fn new(plans: Collection<IndulgencePlan>, popups: Collection<PopupCampaign>) -> Self {
        Self { plans, popups }
    }
}

fn missing(document_id: &ID) -> anyhow::Error {
    anyhow!("Document: {} was not found", document_id)
}

#[async_trait::async_trait]
impl IStatusTransitionRepo for InMemoryStatusTransitionRepo {
    async fn apply_all(
        &self,
        transitions: &[StatusTransition],
        ts: i64,
    ) -> anyhow::Result<Vec<StatusTransition>> {
        // Always plans before popups
        let mut plans = lock(&self.plans);
        let mut popups = lock(&self.popups);

        // Stage on copies so a failing transition leaves nothing behind
        let mut staged_plans = plans.clone();
        let mut staged_popups = popups.clone();
        let mut applied = Vec::with_capacity(transitions.len());

        for transition in transitions {
            let is_applied = match transition {
                StatusTransition::Plan { plan_id, from, to } => {
                    let plan = staged_plans
                        .iter_mut()
                        .find(|p| p.id == *plan_id)
                        .ok_or_else(|| missing(plan_id))?;
                    if plan.status == *from {
                        plan.transition(*to, ts)?;
                        true
                    } else {
                        false
                    }
                }
                StatusTransition::Popup {
                    popup_id,
                    from,
                    to,
                    notified_at,
                } => {
                    let popup = staged_popups
                        .iter_mut()
                        .find(|p| p.id == *popup_id)
                        .ok_or_else(|| missing(popup_id))?;
                    if popup.status == *from {
                        popup.transition(*to, ts)?;
                        if notified_at.is_some() {
                            popup.notified_at = *notified_at;
                        }
                        popup.delivery_claimed_until = None;
                        true
                    } else {
                        false
                    }
                }
            };

            if is_applied {
                applied.push(transition.clone());
            } else {
                info!(
                    document_id = %transition.document_id(),
                    "Transition was already applied by another run, skipping"
                );
            }
        }

        *plans = staged_plans;
        *popups = staged_popups;
        Ok(applied)
    }
}
