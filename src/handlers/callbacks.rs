use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::dialog;
use crate::errors::HandlerResult;
use crate::handlers::utils::send_replies;
use crate::models::Customer;

pub async fn callback_handler(bot: Bot, q: CallbackQuery, state: BotState) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let (Some(data), Some(message)) = (q.data.as_deref(), q.message.as_ref()) else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    // Buttons are single-use; drop them from the message that was pressed.
    let _ = bot.edit_message_reply_markup(chat_id, message_id).await;

    let customer = Customer::from_user(&q.from);
    let replies = dialog::handle_callback(&state, &customer, data).await;
    send_replies(&bot, chat_id, replies).await
}
