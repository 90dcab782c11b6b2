use serde::{Deserialize, Serialize};
use wellness_scheduler_domain::LifecycleReport;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleReportDTO {
    pub activated_plans: usize,
    pub completed_plans: usize,
    pub activated_popups: usize,
    pub completed_popups: usize,
    pub processed_plans: usize,
    pub processed_popups: usize,
}

impl LifecycleReportDTO {
    pub fn new(report: LifecycleReport) -> Self {
        Self {
            activated_plans: report.activated_plans,
            completed_plans: report.completed_plans,
            activated_popups: report.activated_popups,
            completed_popups: report.completed_popups,
            processed_plans: report.processed_plans,
            processed_popups: report.processed_popups,
        }
    }
}
