use serde::{Serialize, Deserialize};
use teloxide::types::{User, UserId};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use super::{Service, TimeSlot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: UserId,
    pub customer_name: String,
    pub service: Service,
    pub day: NaiveDate,
    pub slot: TimeSlot,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// `created_at` comes from the bot's clock, `day` is the day being booked.
    pub fn new(
        customer: &Customer,
        service: Service,
        day: NaiveDate,
        slot: TimeSlot,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: customer.user_id,
            customer_name: customer.name.clone(),
            service,
            day,
            slot,
            created_at,
        }
    }

    /// One agenda line: `14:00: Ana - Haircut`.
    pub fn agenda_line(&self) -> String {
        format!("{}: {} - {}", self.slot, self.customer_name, self.service)
    }
}

/// The person who sent the update. Sessions and bookings belong to the
/// sender, not to the chat, so group members never share a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub user_id: UserId,
    pub name: String,
}

impl Customer {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self { user_id, name: name.into() }
    }

    pub fn from_user(user: &User) -> Self {
        Self::new(user.id, user.first_name.clone())
    }
}
