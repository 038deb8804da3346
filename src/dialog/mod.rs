//! The booking conversation. Operations take the shared [`BotState`] and the
//! customer who wrote, update the session and schedule, and return the
//! replies to send. Nothing in here talks to Telegram.

pub mod flow;
pub mod follow_up;

use chrono::Timelike;

use crate::bot_state::BotState;
use crate::models::{Customer, DialogState, Service, TimeSlot};

pub use flow::{handle_cancel, handle_service_selection, handle_slot_selection, handle_start, show_agenda};
pub use follow_up::{handle_follow_up_answer, handle_option, handle_thanks};

pub const BOOK_BUTTON: &str = "📅 Book";
pub const AGENDA_BUTTON: &str = "📋 Today's agenda";

const SERVICE_PREFIX: &str = "service:";
const SLOT_PREFIX: &str = "slot:";
const OPTION_PREFIX: &str = "option:";
const ANSWER_PREFIX: &str = "answer:";

/// Keyboard to attach to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    /// Persistent "Book" / "Today's agenda" keyboard.
    Main,
    Services,
    Slots(Vec<TimeSlot>),
    YesNo,
    Options,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Menu>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), menu: None }
    }

    pub fn with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Self { text: text.into(), menu: Some(menu) }
    }
}

pub fn service_callback(service: Service) -> String {
    format!("{}{}", SERVICE_PREFIX, service.key())
}

pub fn slot_callback(slot: TimeSlot) -> String {
    format!("{}{}", SLOT_PREFIX, slot)
}

pub fn option_callback(option: u8) -> String {
    format!("{}{}", OPTION_PREFIX, option)
}

pub fn answer_callback(yes: bool) -> String {
    format!("{}{}", ANSWER_PREFIX, if yes { "yes" } else { "no" })
}

/// Words that work from any step of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Book,
    Thanks,
    Agenda,
}

impl Keyword {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == BOOK_BUTTON {
            return Some(Keyword::Book);
        }
        if text == AGENDA_BUTTON {
            return Some(Keyword::Agenda);
        }
        match text.to_lowercase().as_str() {
            "book" => Some(Keyword::Book),
            "thanks" | "thank you" => Some(Keyword::Thanks),
            "agenda" => Some(Keyword::Agenda),
            _ => None,
        }
    }
}

/// Entry point for plain text messages.
pub async fn handle_text(state: &BotState, customer: &Customer, text: &str) -> Vec<Reply> {
    match Keyword::parse(text) {
        Some(Keyword::Book) => return handle_start(state, customer).await,
        Some(Keyword::Thanks) => return handle_thanks(state, customer).await,
        Some(Keyword::Agenda) => return show_agenda(state).await,
        None => {}
    }

    // Known commands never get here; the dialog step is left as it was.
    if text.starts_with('/') {
        return vec![Reply::with_menu(
            "🤷 I don't know that command. Send /help to see what I can do.",
            Menu::Main,
        )];
    }

    match state.get_session(customer.user_id).await {
        DialogState::AwaitingService { .. } => handle_service_selection(state, customer, text).await,
        DialogState::AwaitingSlot { .. } => handle_slot_selection(state, customer, text).await,
        DialogState::AwaitingFollowUp => handle_follow_up_answer(state, customer, text).await,
        DialogState::AwaitingOption => handle_option(state, customer, text).await,
        DialogState::Idle | DialogState::Done => vec![greeting(state)],
    }
}

/// Entry point for inline keyboard presses.
pub async fn handle_callback(state: &BotState, customer: &Customer, data: &str) -> Vec<Reply> {
    if let Some(key) = data.strip_prefix(SERVICE_PREFIX) {
        handle_service_selection(state, customer, key).await
    } else if let Some(slot) = data.strip_prefix(SLOT_PREFIX) {
        handle_slot_selection(state, customer, slot).await
    } else if let Some(option) = data.strip_prefix(OPTION_PREFIX) {
        handle_option(state, customer, option).await
    } else if let Some(answer) = data.strip_prefix(ANSWER_PREFIX) {
        match state.get_session(customer.user_id).await {
            DialogState::AwaitingFollowUp => handle_follow_up_answer(state, customer, answer).await,
            _ => vec![expired_menu()],
        }
    } else {
        log::warn!("Unknown callback data from {}: {}", customer.user_id, data);
        Vec::new()
    }
}

pub fn greeting(state: &BotState) -> Reply {
    let salutation = match state.now().hour() {
        0..=12 => "Good morning",
        13..=17 => "Good afternoon",
        _ => "Good evening",
    };
    Reply::with_menu(
        format!("{}, how are you?\n\nIf you'd like to book a service, type \"book\".", salutation),
        Menu::Main,
    )
}

pub(crate) fn expired_menu() -> Reply {
    Reply::text("⌛ That menu has expired. Type \"book\" or send /start to book again.")
}

pub(crate) fn goodbye() -> Reply {
    Reply::text("Thank you! Have a great day!")
}
