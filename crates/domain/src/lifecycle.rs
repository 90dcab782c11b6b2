use crate::{
    indulgence_plan::PlanStatus,
    popup::PopupStatus,
    shared::{entity::ID, status::LifecycleStatus},
};
use serde::{Deserialize, Serialize};

/// Time an entity stays `Active` before it is eligible for its terminal status
pub const COMPLETION_GRACE_PERIOD_MILLIS: i64 = 1000 * 60 * 60 * 24; // 24 hours

/// A single staged status change.
///
/// A batch of these is persisted as one grouped write. Every transition
/// only applies when the stored status still equals `from`.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusTransition {
    Plan {
        plan_id: ID,
        from: PlanStatus,
        to: PlanStatus,
    },
    Popup {
        popup_id: ID,
        from: PopupStatus,
        to: PopupStatus,
        /// Delivery marker written together with the status
        notified_at: Option<i64>,
    },
}

impl StatusTransition {
    pub fn plan(plan_id: ID, from: PlanStatus) -> Option<Self> {
        from.next().map(|to| Self::Plan { plan_id, from, to })
    }

    pub fn popup(popup_id: ID, from: PopupStatus, notified_at: Option<i64>) -> Option<Self> {
        from.next().map(|to| Self::Popup {
            popup_id,
            from,
            to,
            notified_at,
        })
    }

    pub fn document_id(&self) -> &ID {
        match self {
            Self::Plan { plan_id, .. } => plan_id,
            Self::Popup { popup_id, .. } => popup_id,
        }
    }
}

/// Summary of a lifecycle run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleReport {
    pub activated_plans: usize,
    pub completed_plans: usize,
    pub activated_popups: usize,
    pub completed_popups: usize,
    pub processed_plans: usize,
    pub processed_popups: usize,
}

impl LifecycleReport {
    pub fn record(&mut self, transition: &StatusTransition) {
        match transition {
            StatusTransition::Plan { to, .. } => {
                match to {
                    PlanStatus::Active => self.activated_plans += 1,
                    PlanStatus::Completed => self.completed_plans += 1,
                    PlanStatus::Planned => return,
                }
                self.processed_plans += 1;
            }
            StatusTransition::Popup { to, .. } => {
                match to {
                    PopupStatus::Active => self.activated_popups += 1,
                    PopupStatus::Ended => self.completed_popups += 1,
                    PopupStatus::Scheduled => return,
                }
                self.processed_popups += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.processed_plans + self.processed_popups
    }
}
