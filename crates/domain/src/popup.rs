use crate::shared::{
    entity::{Entity, ID},
    status::{InvalidStatusError, InvalidTransitionError, LifecycleStatus},
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupStatus {
    Scheduled,
    Active,
    Ended,
}

impl LifecycleStatus for PopupStatus {
    fn next(self) -> Option<Self> {
        match self {
            Self::Scheduled => Some(Self::Active),
            Self::Active => Some(Self::Ended),
            Self::Ended => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }
}

impl Display for PopupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PopupStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

/// A `PopupCampaign` is a promotional message shown to every client
/// from `scheduled_at` and for the following completion grace period.
///
/// Clients are notified exactly when the campaign becomes `Active`.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupCampaign {
    pub id: ID,
    pub name: String,
    pub body: String,
    pub status: PopupStatus,
    /// Timestamp in millis at which the campaign goes live
    pub scheduled_at: i64,
    /// A lifecycle run that is delivering the activation notification
    /// owns the campaign until this timestamp. Other runs leave it alone.
    pub delivery_claimed_until: Option<i64>,
    /// Set in the same write that marks the campaign `Active`
    pub notified_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl PopupCampaign {
    pub fn new(name: String, body: String, scheduled_at: i64, created: i64) -> Self {
        Self {
            id: Default::default(),
            name,
            body,
            status: PopupStatus::Scheduled,
            scheduled_at,
            delivery_claimed_until: None,
            notified_at: None,
            created,
            updated: created,
        }
    }

    pub fn transition(&mut self, to: PopupStatus, ts: i64) -> Result<(), InvalidTransitionError> {
        self.status.check_transition(to)?;
        self.status = to;
        self.updated = ts;
        Ok(())
    }

    /// Whether another lifecycle run currently owns the delivery
    pub fn is_delivery_claimed(&self, now: i64) -> bool {
        matches!(self.delivery_claimed_until, Some(until) if until > now)
    }
}

impl Entity for PopupCampaign {
    fn id(&self) -> &ID {
        &self.id
    }
}
