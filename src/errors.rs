use thiserror::Error;

use crate::models::{BusinessHours, TimeSlot};

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Everything a user can get wrong while booking. None of these are fatal:
/// the dialog answers with `user_message` and asks again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("unknown service choice: {0:?}")]
    InvalidService(String),
    #[error("malformed time slot: {0:?}")]
    MalformedSlot(String),
    #[error("{slot} is outside business hours")]
    OutsideHours { slot: TimeSlot, hours: BusinessHours },
    #[error("{0} has already passed")]
    SlotInPast(TimeSlot),
    #[error("{0} is already booked")]
    SlotTaken(TimeSlot),
}

impl BookingError {
    pub fn user_message(&self) -> String {
        match self {
            BookingError::InvalidService(_) => {
                "❌ Invalid option. Please choose one of the services below.".to_string()
            }
            BookingError::MalformedSlot(_) => {
                "❌ Invalid time format. Send the time as HH:MM, for example 14:00.".to_string()
            }
            BookingError::OutsideHours { hours, .. } => {
                format!("❌ We are open {}. Please pick a time inside business hours.", hours.describe())
            }
            BookingError::SlotInPast(slot) => {
                format!("❌ {} has already passed today. Please pick a later time.", slot)
            }
            BookingError::SlotTaken(slot) => {
                format!("❌ The {} slot is unavailable. Please choose another time.", slot)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bot token is not set (TELOXIDE_TOKEN or TELEGRAM_API_KEY)")]
    MissingToken,
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("business hours {opening}..={closing} are not a valid range inside a day")]
    InvalidHours { opening: u32, closing: u32 },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}
