use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup};

use crate::dialog::{
    answer_callback, option_callback, service_callback, slot_callback, Menu, Reply, AGENDA_BUTTON, BOOK_BUTTON,
};
use crate::errors::HandlerResult;
use crate::models::{Customer, Service, TimeSlot};

const SLOTS_PER_ROW: usize = 4;

/// Persistent "Book" / "Today's agenda" keyboard.
pub fn main_menu_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![vec![
            KeyboardButton::new(BOOK_BUTTON),
            KeyboardButton::new(AGENDA_BUTTON),
        ]])
        .resize_keyboard(),
    )
}

pub fn make_services_keyboard() -> InlineKeyboardMarkup {
    let keyboard = Service::ALL
        .iter()
        .map(|&service| {
            vec![InlineKeyboardButton::callback(
                format!("{}. {}", service.number(), service.label()),
                service_callback(service),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_time_keyboard(slots: &[TimeSlot]) -> InlineKeyboardMarkup {
    let keyboard = slots
        .chunks(SLOTS_PER_ROW)
        .map(|row| {
            row.iter()
                .map(|&slot| InlineKeyboardButton::callback(slot.to_string(), slot_callback(slot)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_yes_no_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Yes", answer_callback(true)),
        InlineKeyboardButton::callback("❌ No", answer_callback(false)),
    ]])
}

pub fn make_options_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🔁 Reschedule", option_callback(1))],
        vec![InlineKeyboardButton::callback("☎️ Talk to reception", option_callback(2))],
        vec![InlineKeyboardButton::callback("👋 Finish", option_callback(3))],
    ])
}

pub fn reply_markup(menu: &Menu) -> ReplyMarkup {
    match menu {
        Menu::Main => main_menu_keyboard(),
        Menu::Services => ReplyMarkup::InlineKeyboard(make_services_keyboard()),
        Menu::Slots(slots) => ReplyMarkup::InlineKeyboard(make_time_keyboard(slots)),
        Menu::YesNo => ReplyMarkup::InlineKeyboard(make_yes_no_keyboard()),
        Menu::Options => ReplyMarkup::InlineKeyboard(make_options_keyboard()),
    }
}

pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> HandlerResult {
    for reply in replies {
        let request = bot.send_message(chat_id, reply.text);
        match reply.menu {
            Some(menu) => request.reply_markup(reply_markup(&menu)).await?,
            None => request.await?,
        };
    }
    Ok(())
}

/// The user behind a message update. Channel posts have no sender.
pub fn sender(upd: &Update) -> Option<Customer> {
    upd.from().map(Customer::from_user)
}
