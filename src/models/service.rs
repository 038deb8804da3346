use serde::{Serialize, Deserialize};
use std::fmt;

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    Haircut,
    Beard,
    HaircutAndBeard,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Haircut, Service::Beard, Service::HaircutAndBeard];

    /// Position in the numbered menu, starting at 1.
    pub fn number(self) -> usize {
        match self {
            Service::Haircut => 1,
            Service::Beard => 2,
            Service::HaircutAndBeard => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Service::Haircut => "Haircut",
            Service::Beard => "Beard",
            Service::HaircutAndBeard => "Haircut and beard",
        }
    }

    /// Stable identifier used in callback payloads.
    pub fn key(self) -> &'static str {
        match self {
            Service::Haircut => "haircut",
            Service::Beard => "beard",
            Service::HaircutAndBeard => "haircut_beard",
        }
    }

    /// Accepts the menu number, the label or the key, ignoring case.
    pub fn from_choice(choice: &str) -> Result<Self, BookingError> {
        let choice = choice.trim();
        Self::ALL
            .into_iter()
            .find(|service| {
                choice == service.number().to_string()
                    || choice.eq_ignore_ascii_case(service.label())
                    || choice.eq_ignore_ascii_case(service.key())
            })
            .ok_or_else(|| BookingError::InvalidService(choice.to_string()))
    }

    pub fn menu_text() -> String {
        let lines: Vec<String> = Self::ALL
            .iter()
            .map(|service| format!("{}. {}", service.number(), service.label()))
            .collect();
        lines.join("\n")
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_number_label_and_key() {
        assert_eq!(Service::from_choice("1"), Ok(Service::Haircut));
        assert_eq!(Service::from_choice("  beard "), Ok(Service::Beard));
        assert_eq!(Service::from_choice("HAIRCUT AND BEARD"), Ok(Service::HaircutAndBeard));
        assert_eq!(Service::from_choice("haircut_beard"), Ok(Service::HaircutAndBeard));
    }

    #[test]
    fn rejects_anything_else() {
        for choice in ["0", "4", "", "manicure", "1.", "haircut please"] {
            assert_eq!(
                Service::from_choice(choice),
                Err(BookingError::InvalidService(choice.trim().to_string()))
            );
        }
    }

    #[test]
    fn menu_lists_every_service_in_order() {
        assert_eq!(Service::menu_text(), "1. Haircut\n2. Beard\n3. Haircut and beard");
    }
}
