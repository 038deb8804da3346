pub mod booking;
pub mod service;
pub mod session;
pub mod time_slot;

pub use booking::{Booking, Customer};
pub use service::Service;
pub use session::{DialogState, UserSession};
pub use time_slot::{BusinessHours, TimeSlot};
