use crate::shared::{
    auth::protect_trigger_route,
    usecase::{execute, UseCase},
};
use crate::error::WellnessError;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::future::join_all;
use tracing::{error, info, warn};
use wellness_scheduler_api_structs::process_scheduled_events::*;
use wellness_scheduler_domain::{
    LifecycleReport, PlanStatus, PopupCampaign, PopupStatus, StatusTransition,
    COMPLETION_GRACE_PERIOD_MILLIS,
};
use wellness_scheduler_infra::WellnessContext;

pub async fn process_scheduled_events_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<WellnessContext>,
) -> Result<HttpResponse, WellnessError> {
    protect_trigger_route(&http_req, &ctx)?;

    let now = ctx.sys.get_timestamp_millis();
    let dry_run = query.dry_run;
    let usecase = ProcessScheduledEventsUseCase { now, dry_run };

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report, dry_run, now)))
        .map_err(WellnessError::from)
}

/// Advances every `IndulgencePlan` and `PopupCampaign` whose stored status is
/// stale relative to `now`, and notifies clients of campaigns going live.
///
/// All staged transitions are persisted in a single grouped write which is
/// only issued after every notification of the run has settled.
#[derive(Debug)]
pub struct ProcessScheduledEventsUseCase {
    /// Timestamp in millis every due check compares against
    pub now: i64,
    /// Report what would happen without writing or notifying
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    QueryFailed,
    CommitFailed,
}

impl From<UseCaseError> for WellnessError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::QueryFailed | UseCaseError::CommitFailed => Self::InternalError,
        }
    }
}

/// Notifies clients that `popup` went live and stages its activation.
///
/// Returns `None` when the campaign is owned by another run or the
/// notification failed, in which case it stays `Scheduled` for the next run.
/// A campaign already notified by an earlier run is staged without sending again.
async fn deliver_popup_activation(
    popup: PopupCampaign,
    now: i64,
    ctx: &WellnessContext,
) -> Option<StatusTransition> {
    let claim_until = now + ctx.config.popup_delivery_lease_millis;
    let popup = match ctx.repos.popups.claim_delivery(&popup.id, now, claim_until).await {
        Ok(Some(claimed)) => claimed,
        Ok(None) => {
            info!(popup_id = %popup.id, "Popup delivery is owned by another run, skipping");
            return None;
        }
        Err(e) => {
            warn!(popup_id = %popup.id, "Unable to claim popup delivery: {:?}", e);
            return None;
        }
    };

    if let Some(notified_at) = popup.notified_at {
        info!(popup_id = %popup.id, notified_at, "Popup was already notified, staging activation");
        return StatusTransition::popup(popup.id, popup.status, Some(notified_at));
    }

    if let Err(e) = ctx.notifier.send_scheduled_popup_notification(&popup).await {
        warn!(popup_id = %popup.id, "Popup notification failed: {:?}", e);
        if let Err(e) = ctx.repos.popups.release_delivery(&popup.id, claim_until).await {
            // The claim expires by itself
            warn!(popup_id = %popup.id, "Unable to release popup delivery: {:?}", e);
        }
        return None;
    }

    match ctx.repos.popups.mark_notified(&popup.id, now).await {
        Ok(true) => (),
        Ok(false) => warn!(popup_id = %popup.id, "Popup was marked as notified by another run"),
        // The grouped write records the marker as well
        Err(e) => warn!(popup_id = %popup.id, "Unable to mark popup as notified: {:?}", e),
    }

    StatusTransition::popup(popup.id, popup.status, Some(now))
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessScheduledEventsUseCase {
    type Response = LifecycleReport;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessScheduledEvents";

    async fn execute(&mut self, ctx: &WellnessContext) -> Result<Self::Response, Self::Error> {
        let now = self.now;
        let completion_due_before = now - COMPLETION_GRACE_PERIOD_MILLIS;
        let plans = &ctx.repos.indulgence_plans;
        let popups = &ctx.repos.popups;

        let (plans_to_activate, plans_to_complete, popups_to_activate, popups_to_end) =
            futures::try_join!(
                plans.find_by_status_before(PlanStatus::Planned, now),
                plans.find_by_status_before(PlanStatus::Active, completion_due_before),
                popups.find_by_status_before(PopupStatus::Scheduled, now),
                popups.find_by_status_before(PopupStatus::Active, completion_due_before),
            )
            .map_err(|e| {
                error!("Unable to query due lifecycle documents: {:?}", e);
                UseCaseError::QueryFailed
            })?;

        let mut transitions = plans_to_activate
            .iter()
            .chain(plans_to_complete.iter())
            .filter_map(|plan| StatusTransition::plan(plan.id.clone(), plan.status))
            .collect::<Vec<_>>();

        if self.dry_run {
            transitions.extend(
                popups_to_activate
                    .iter()
                    .filter(|popup| !popup.is_delivery_claimed(now))
                    .filter_map(|popup| {
                        StatusTransition::popup(popup.id.clone(), popup.status, Some(now))
                    }),
            );
        } else {
            let deliveries = popups_to_activate
                .into_iter()
                .map(|popup| deliver_popup_activation(popup, now, ctx));
            transitions.extend(join_all(deliveries).await.into_iter().flatten());
        }

        transitions.extend(
            popups_to_end
                .iter()
                .filter_map(|popup| StatusTransition::popup(popup.id.clone(), popup.status, None)),
        );

        let staged = transitions.len();
        let applied = if self.dry_run || transitions.is_empty() {
            transitions
        } else {
            ctx.repos
                .status_transitions
                .apply_all(&transitions, now)
                .await
                .map_err(|e| {
                    error!("Unable to persist {} lifecycle transitions: {:?}", staged, e);
                    UseCaseError::CommitFailed
                })?
        };

        let mut report = LifecycleReport::default();
        for transition in &applied {
            report.record(transition);
        }

        info!(
            dry_run = self.dry_run,
            activated_plans = report.activated_plans,
            completed_plans = report.completed_plans,
            activated_popups = report.activated_popups,
            completed_popups = report.completed_popups,
            skipped = staged - applied.len(),
            "Lifecycle run finished with {} transitions",
            report.total()
        );

        Ok(report)
    }
}
