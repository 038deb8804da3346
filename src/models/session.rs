use serde::{Serialize, Deserialize};
use chrono::NaiveDateTime;

use super::Service;

/// Where a user currently is in the booking conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DialogState {
    #[default]
    Idle,
    AwaitingService { rescheduling: bool },
    AwaitingSlot { service: Service, rescheduling: bool },
    Done,
    /// "Anything else?" after the user said thanks.
    AwaitingFollowUp,
    /// Reschedule / reception / finish menu.
    AwaitingOption,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub state: DialogState,
    pub last_seen: NaiveDateTime,
}

impl UserSession {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { state: DialogState::Idle, last_seen: now }
    }
}
