use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::dialog;
use crate::errors::HandlerResult;
use crate::handlers::utils::{send_replies, sender};

pub async fn message_handler(bot: Bot, upd: Update, msg: Message, state: BotState) -> HandlerResult {
    let Some(customer) = sender(&upd) else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "I can only read text messages.").await?;
        return Ok(());
    };

    let replies = dialog::handle_text(&state, &customer, text).await;
    send_replies(&bot, msg.chat.id, replies).await
}
