pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::BookingError;
use crate::models::{Booking, TimeSlot};

pub use memory::InMemorySchedule;

/// Storage for the day's bookings. The dialog only talks to this trait, so a
/// persistent backend can replace the in-memory one without touching it.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Inserts the booking if its slot is free. The first writer wins; an
    /// existing booking is never overwritten.
    async fn book(&self, booking: Booking) -> Result<(), BookingError>;

    /// Like `book`, except a slot the same customer already holds counts as
    /// free. On success the customer's earlier bookings for that day are
    /// dropped and returned.
    async fn rebook(&self, booking: Booking) -> Result<Vec<Booking>, BookingError>;

    async fn booked_slots(&self, day: NaiveDate) -> Vec<TimeSlot>;

    /// Bookings for `day`, ordered by slot.
    async fn bookings_on(&self, day: NaiveDate) -> Vec<Booking>;

    /// Forgets every day before `day`. Returns how many bookings were dropped.
    async fn purge_before(&self, day: NaiveDate) -> usize;
}
