use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::ScheduleStore;
use crate::errors::BookingError;
use crate::models::{Booking, TimeSlot};

type DaySchedule = BTreeMap<TimeSlot, Booking>;

/// Process-local schedule. Bookings are lost on restart.
#[derive(Clone, Default)]
pub struct InMemorySchedule {
    days: Arc<RwLock<BTreeMap<NaiveDate, DaySchedule>>>,
}

impl InMemorySchedule {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleStore for InMemorySchedule {
    async fn book(&self, booking: Booking) -> Result<(), BookingError> {
        let mut days = self.days.write().await;
        let day = days.entry(booking.day).or_default();

        if day.contains_key(&booking.slot) {
            return Err(BookingError::SlotTaken(booking.slot));
        }

        log::info!(
            "📅 Booking {}: {} for {} ({}) on {}",
            booking.id, booking.slot, booking.user_id, booking.service, booking.day
        );
        day.insert(booking.slot, booking);
        Ok(())
    }

    async fn rebook(&self, booking: Booking) -> Result<Vec<Booking>, BookingError> {
        let mut days = self.days.write().await;
        let day = days.entry(booking.day).or_default();

        if day
            .get(&booking.slot)
            .is_some_and(|holder| holder.user_id != booking.user_id)
        {
            return Err(BookingError::SlotTaken(booking.slot));
        }

        let previous: Vec<TimeSlot> = day
            .values()
            .filter(|existing| existing.user_id == booking.user_id)
            .map(|existing| existing.slot)
            .collect();
        let released: Vec<Booking> = previous
            .iter()
            .filter_map(|slot| day.remove(slot))
            .collect();

        log::info!(
            "🔁 Rebooked {} to {} ({} previous booking(s) released)",
            booking.user_id, booking.slot, released.len()
        );
        day.insert(booking.slot, booking);
        Ok(released)
    }

    async fn booked_slots(&self, day: NaiveDate) -> Vec<TimeSlot> {
        let days = self.days.read().await;
        days.get(&day)
            .map(|bookings| bookings.keys().copied().collect())
            .unwrap_or_default()
    }

    async fn bookings_on(&self, day: NaiveDate) -> Vec<Booking> {
        let days = self.days.read().await;
        days.get(&day)
            .map(|bookings| bookings.values().cloned().collect())
            .unwrap_or_default()
    }

    async fn purge_before(&self, day: NaiveDate) -> usize {
        let mut days = self.days.write().await;
        let kept = days.split_off(&day);
        let dropped = days.values().map(BTreeMap::len).sum();
        *days = kept;

        if dropped > 0 {
            log::debug!("🧹 Schedule purged: {} booking(s) before {}", dropped, day);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Service};
    use teloxide::types::UserId;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn slot(hour: u32) -> TimeSlot {
        TimeSlot::new(hour, 0).unwrap()
    }

    fn booking(user: u64, d: u32, hour: u32) -> Booking {
        booking_for(user, d, hour, Service::Haircut)
    }

    fn booking_for(user: u64, d: u32, hour: u32, service: Service) -> Booking {
        let customer = Customer::new(UserId(user), format!("user{user}"));
        let created_at = day(d).and_hms_opt(8, 0, 0).unwrap();
        Booking::new(&customer, service, day(d), slot(hour), created_at)
    }

    #[tokio::test]
    async fn first_writer_wins() {
        let schedule = InMemorySchedule::new();
        let first = booking(1, 10, 14);
        schedule.book(first.clone()).await.unwrap();

        let err = schedule.book(booking(2, 10, 14)).await.unwrap_err();
        assert_eq!(err, BookingError::SlotTaken(slot(14)));

        let bookings = schedule.bookings_on(day(10)).await;
        assert_eq!(bookings, vec![first]);
    }

    #[tokio::test]
    async fn same_slot_on_another_day_is_free() {
        let schedule = InMemorySchedule::new();
        schedule.book(booking(1, 10, 14)).await.unwrap();
        schedule.book(booking(2, 11, 14)).await.unwrap();
        assert_eq!(schedule.booked_slots(day(10)).await, vec![slot(14)]);
        assert_eq!(schedule.booked_slots(day(11)).await, vec![slot(14)]);
    }

    #[tokio::test]
    async fn bookings_come_back_ordered_by_slot() {
        let schedule = InMemorySchedule::new();
        for hour in [16, 9, 12] {
            schedule.book(booking(hour as u64, 10, hour)).await.unwrap();
        }
        let slots: Vec<String> = schedule
            .bookings_on(day(10))
            .await
            .iter()
            .map(|b| b.slot.to_string())
            .collect();
        assert_eq!(slots, ["09:00", "12:00", "16:00"]);
    }

    #[tokio::test]
    async fn rebook_releases_previous_booking_only_on_success() {
        let schedule = InMemorySchedule::new();
        let old = booking(1, 10, 10);
        schedule.book(old.clone()).await.unwrap();
        schedule.book(booking(2, 10, 12)).await.unwrap();

        let err = schedule.rebook(booking(1, 10, 12)).await.unwrap_err();
        assert_eq!(err, BookingError::SlotTaken(slot(12)));
        assert_eq!(schedule.booked_slots(day(10)).await, vec![slot(10), slot(12)]);

        let released = schedule.rebook(booking(1, 10, 15)).await.unwrap();
        assert_eq!(released, vec![old]);
        assert_eq!(schedule.booked_slots(day(10)).await, vec![slot(12), slot(15)]);
    }

    #[tokio::test]
    async fn rebook_can_keep_the_customers_own_slot() {
        let schedule = InMemorySchedule::new();
        let old = booking(1, 10, 10);
        schedule.book(old.clone()).await.unwrap();

        let released = schedule.rebook(booking_for(1, 10, 10, Service::Beard)).await.unwrap();
        assert_eq!(released, vec![old]);

        let bookings = schedule.bookings_on(day(10)).await;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].service, Service::Beard);
        assert_eq!(bookings[0].slot, slot(10));
    }

    #[tokio::test]
    async fn purge_drops_previous_days() {
        let schedule = InMemorySchedule::new();
        schedule.book(booking(1, 9, 10)).await.unwrap();
        schedule.book(booking(2, 9, 11)).await.unwrap();
        schedule.book(booking(3, 10, 10)).await.unwrap();

        assert_eq!(schedule.purge_before(day(10)).await, 2);
        assert!(schedule.bookings_on(day(9)).await.is_empty());
        assert_eq!(schedule.bookings_on(day(10)).await.len(), 1);
        assert_eq!(schedule.purge_before(day(10)).await, 0);
    }
}
