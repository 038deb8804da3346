use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use teloxide::types::UserId;
use tokio::sync::RwLock;
use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::Clock;
use crate::models::{BusinessHours, DialogState, UserSession};
use crate::schedule::ScheduleStore;

type SessionCache = Arc<RwLock<HashMap<UserId, UserSession>>>;

/// Everything a handler needs: sessions, the schedule, and the clock.
#[derive(Clone)]
pub struct BotState {
    sessions: SessionCache,
    schedule: Arc<dyn ScheduleStore>,
    clock: Arc<dyn Clock>,
    hours: BusinessHours,
    session_ttl: Duration,
}

impl BotState {
    pub fn new(
        schedule: Arc<dyn ScheduleStore>,
        clock: Arc<dyn Clock>,
        hours: BusinessHours,
        session_ttl: Duration,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            schedule,
            clock,
            hours,
            session_ttl,
        }
    }

    pub fn schedule(&self) -> &dyn ScheduleStore {
        self.schedule.as_ref()
    }

    pub fn hours(&self) -> BusinessHours {
        self.hours
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Current dialog state, creating a fresh session on first contact.
    pub async fn get_session(&self, user_id: UserId) -> DialogState {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_insert_with(|| {
            log::debug!("👤 New session for {}", user_id);
            UserSession::new(now)
        });
        session.last_seen = now;
        session.state
    }

    pub async fn save_session(&self, user_id: UserId, state: DialogState) {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        sessions.insert(user_id, UserSession { state, last_seen: now });
    }

    pub async fn reset_session(&self, user_id: UserId) {
        self.save_session(user_id, DialogState::Idle).await;
    }

    /// Evicts sessions idle for longer than the configured TTL.
    pub async fn cleanup_sessions(&self) -> usize {
        let now = self.clock.now();
        let ttl = chrono::Duration::seconds(self.session_ttl.as_secs() as i64);
        let mut sessions = self.sessions.write().await;
        let previous_count = sessions.len();

        sessions.retain(|_, session| now.signed_duration_since(session.last_seen) < ttl);

        let current_count = sessions.len();
        log::debug!("🧹 Sessions cleaned: {} -> {} entries", previous_count, current_count);
        previous_count - current_count
    }

    /// Periodic housekeeping: idle sessions and previous days' bookings.
    pub async fn run_maintenance(&self) {
        self.cleanup_sessions().await;
        self.schedule.purge_before(self.today()).await;
    }

    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::Service;
    use crate::schedule::InMemorySchedule;

    fn state(clock: Arc<FixedClock>) -> BotState {
        BotState::new(
            Arc::new(InMemorySchedule::new()),
            clock,
            BusinessHours::default(),
            Duration::from_secs(1800),
        )
    }

    #[tokio::test]
    async fn first_contact_creates_idle_session() {
        let state = state(Arc::new(FixedClock::at(2024, 5, 10, 10, 0)));
        assert_eq!(state.get_session(UserId(1)).await, DialogState::Idle);
        assert_eq!(state.session_count().await, 1);
    }

    #[tokio::test]
    async fn saved_state_is_returned() {
        let state = state(Arc::new(FixedClock::at(2024, 5, 10, 10, 0)));
        let awaiting = DialogState::AwaitingSlot { service: Service::Beard, rescheduling: false };
        state.save_session(UserId(1), awaiting).await;
        assert_eq!(state.get_session(UserId(1)).await, awaiting);

        state.reset_session(UserId(1)).await;
        assert_eq!(state.get_session(UserId(1)).await, DialogState::Idle);
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted_after_ttl() {
        let clock = Arc::new(FixedClock::at(2024, 5, 10, 10, 0));
        let state = state(clock.clone());
        state.save_session(UserId(1), DialogState::AwaitingService { rescheduling: false }).await;

        clock.advance(chrono::Duration::minutes(20));
        state.get_session(UserId(2)).await;
        assert_eq!(state.cleanup_sessions().await, 0);

        clock.advance(chrono::Duration::minutes(15));
        assert_eq!(state.cleanup_sessions().await, 1);
        assert_eq!(state.session_count().await, 1);

        // the evicted user starts over
        assert_eq!(state.get_session(UserId(1)).await, DialogState::Idle);
    }
}
