use crate::dtos::LifecycleReportDTO;
use serde::{Deserialize, Serialize};
use wellness_scheduler_domain::LifecycleReport;

pub mod process_scheduled_events {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub dry_run: bool,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub dry_run: bool,
        /// Timestamp in millis the run compared against
        pub processed_at: i64,
        pub report: LifecycleReportDTO,
    }

    impl APIResponse {
        pub fn new(report: LifecycleReport, dry_run: bool, processed_at: i64) -> Self {
            Self {
                dry_run,
                processed_at,
                report: LifecycleReportDTO::new(report),
            }
        }
    }
}
