use crate::shared::{
    entity::{Entity, ID},
    status::{InvalidStatusError, InvalidTransitionError, LifecycleStatus},
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Planned,
    Active,
    Completed,
}

impl LifecycleStatus for PlanStatus {
    fn next(self) -> Option<Self> {
        match self {
            Self::Planned => Some(Self::Active),
            Self::Active => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

/// An `IndulgencePlan` is a client's planned deviation from their
/// nutrition program, for example a birthday dinner.
///
/// It becomes `Active` when `indulgence_date` is reached and `Completed`
/// once the completion grace period after `indulgence_date` has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct IndulgencePlan {
    pub id: ID,
    /// The client owning this plan
    pub user_id: ID,
    pub title: String,
    pub status: PlanStatus,
    /// Timestamp in millis of the planned indulgence
    pub indulgence_date: i64,
    pub created: i64,
    pub updated: i64,
}

impl IndulgencePlan {
    pub fn new(user_id: ID, title: String, indulgence_date: i64, created: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title,
            status: PlanStatus::Planned,
            indulgence_date,
            created,
            updated: created,
        }
    }

    pub fn transition(&mut self, to: PlanStatus, ts: i64) -> Result<(), InvalidTransitionError> {
        self.status.check_transition(to)?;
        self.status = to;
        self.updated = ts;
        Ok(())
    }
}

impl Entity for IndulgencePlan {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_planned_plan() {
        let plan = IndulgencePlan::new(ID::new(), "Birthday dinner".into(), 100, 10);
        assert_eq!(plan.status, PlanStatus::Planned);
        assert_eq!(plan.updated, 10);
    }

    #[test]
    fn it_only_moves_forward_one_step() {
        let mut plan = IndulgencePlan::new(ID::new(), "Pizza night".into(), 100, 0);
        assert!(plan.transition(PlanStatus::Completed, 1).is_err());
        assert_eq!(plan.status, PlanStatus::Planned);

        assert!(plan.transition(PlanStatus::Active, 2).is_ok());
        assert!(plan.transition(PlanStatus::Planned, 3).is_err());
        assert!(plan.transition(PlanStatus::Completed, 4).is_ok());
        assert_eq!(plan.updated, 4);

        let err = plan.transition(PlanStatus::Completed, 5).unwrap_err();
        assert_eq!(err.from, "completed");
    }

    #[test]
    fn status_string_roundtrip() {
        for status in [PlanStatus::Planned, PlanStatus::Active, PlanStatus::Completed] {
            assert_eq!(status.as_str().parse::<PlanStatus>(), Ok(status));
        }
        assert!("scheduled".parse::<PlanStatus>().is_err());
    }
}
