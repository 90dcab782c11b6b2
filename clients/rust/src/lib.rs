mod base;
mod lifecycle;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use lifecycle::LifecycleClient;
pub use lifecycle::ProcessScheduledEventsInput;
use status::StatusClient;
use std::sync::Arc;

pub use wellness_scheduler_api_structs::dtos::LifecycleReportDTO as LifecycleReport;

/// Wellness Scheduler Server SDK
///
/// The SDK contains methods for interacting with the Wellness Scheduler
/// server API.
#[derive(Clone)]
pub struct WellnessSDK {
    pub lifecycle: LifecycleClient,
    pub status: StatusClient,
}

impl WellnessSDK {
    pub fn new<T: Into<String>>(address: String, trigger_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_trigger_key(trigger_key.into());
        let base = Arc::new(base);
        let lifecycle = LifecycleClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { lifecycle, status }
    }
}
