use serde::{Serialize, Deserialize};
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeSlot)
    }

    /// Parses `H`, `HH`, `H:MM` or `HH:MM`.
    pub fn parse(text: &str) -> Result<Self, BookingError> {
        let text = text.trim();
        let malformed = || BookingError::MalformedSlot(text.to_string());

        let (hour, minute) = match text.split_once(':') {
            Some((hour, minute)) => (hour, Some(minute)),
            None => (text, None),
        };

        if !is_digits(hour, 1..=2) {
            return Err(malformed());
        }
        let minute = match minute {
            Some(minute) if is_digits(minute, 2..=2) => minute,
            Some(_) => return Err(malformed()),
            None => "0",
        };

        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        Self::new(hour, minute).ok_or_else(malformed)
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn time(self) -> NaiveTime {
        self.0
    }
}

fn is_digits(text: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Opening hours for the day. Both bounds are whole hours and the closing
/// hour itself is still bookable (17:30 is inside 9..=17).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub opening_hour: u32,
    pub closing_hour: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self { opening_hour: 9, closing_hour: 17 }
    }
}

impl BusinessHours {
    pub fn contains(&self, slot: TimeSlot) -> bool {
        (self.opening_hour..=self.closing_hour).contains(&slot.hour())
    }

    /// Hourly slots from opening to closing.
    pub fn hourly_slots(&self) -> Vec<TimeSlot> {
        (self.opening_hour..=self.closing_hour)
            .filter_map(|hour| TimeSlot::new(hour, 0))
            .collect()
    }

    /// Runs every check a requested slot has to pass before it can be booked.
    pub fn validate(&self, text: &str, now: NaiveDateTime) -> Result<TimeSlot, BookingError> {
        let slot = TimeSlot::parse(text)?;
        if !self.contains(slot) {
            return Err(BookingError::OutsideHours { slot, hours: *self });
        }
        if slot.time() <= now.time() {
            return Err(BookingError::SlotInPast(slot));
        }
        Ok(slot)
    }

    pub fn describe(&self) -> String {
        format!("from {:02}:00 to {:02}:59", self.opening_hour, self.closing_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .and_then(|day| day.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn parses_hours_and_hours_with_minutes() {
        assert_eq!(TimeSlot::parse("14"), Ok(TimeSlot::new(14, 0).unwrap()));
        assert_eq!(TimeSlot::parse("14:00"), Ok(TimeSlot::new(14, 0).unwrap()));
        assert_eq!(TimeSlot::parse(" 9:30 "), Ok(TimeSlot::new(9, 30).unwrap()));
        assert_eq!(TimeSlot::parse("09:05").unwrap().to_string(), "09:05");
    }

    #[test]
    fn rejects_malformed_slots() {
        for text in ["abc", "14:60", "25", "14:5", "14:", ":30", "1400", "-1", "14h"] {
            assert_eq!(
                TimeSlot::parse(text),
                Err(BookingError::MalformedSlot(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn closing_hour_is_inclusive() {
        let hours = BusinessHours::default();
        assert!(hours.contains(TimeSlot::new(9, 0).unwrap()));
        assert!(hours.contains(TimeSlot::new(17, 59).unwrap()));
        assert!(!hours.contains(TimeSlot::new(8, 59).unwrap()));
        assert!(!hours.contains(TimeSlot::new(18, 0).unwrap()));
    }

    #[test]
    fn hourly_slots_cover_the_whole_day() {
        let slots = BusinessHours::default().hourly_slots();
        assert_eq!(slots.len(), 9);
        assert_eq!(slots[0].to_string(), "09:00");
        assert_eq!(slots[8].to_string(), "17:00");
    }

    #[test]
    fn validate_checks_hours_then_clock() {
        let hours = BusinessHours::default();
        let slot = TimeSlot::new(8, 0).unwrap();
        assert_eq!(
            hours.validate("8", at(7, 0)),
            Err(BookingError::OutsideHours { slot, hours })
        );
        assert_eq!(
            hours.validate("10:00", at(10, 0)),
            Err(BookingError::SlotInPast(TimeSlot::new(10, 0).unwrap()))
        );
        assert_eq!(hours.validate("10:30", at(10, 0)), Ok(TimeSlot::new(10, 30).unwrap()));
    }
}
