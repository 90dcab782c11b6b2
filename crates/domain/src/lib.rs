mod indulgence_plan;
mod lifecycle;
mod popup;
mod shared;

pub use indulgence_plan::{IndulgencePlan, PlanStatus};
pub use lifecycle::{LifecycleReport, StatusTransition, COMPLETION_GRACE_PERIOD_MILLIS};
pub use popup::{PopupCampaign, PopupStatus};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::status::{InvalidStatusError, InvalidTransitionError, LifecycleStatus};
