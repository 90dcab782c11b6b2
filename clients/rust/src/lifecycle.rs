use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use wellness_scheduler_api_structs::process_scheduled_events;

#[derive(Clone)]
pub struct LifecycleClient {
    base: Arc<BaseClient>,
}

pub struct ProcessScheduledEventsInput {
    /// Only report what would change
    pub dry_run: bool,
}

impl LifecycleClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Triggers a lifecycle run at the server's current time
    pub async fn process(
        &self,
        input: ProcessScheduledEventsInput,
    ) -> APIResponse<process_scheduled_events::APIResponse> {
        self.base
            .post(
                (),
                format!("lifecycle/process?dryRun={}", input.dry_run),
                StatusCode::OK,
            )
            .await
    }
}
