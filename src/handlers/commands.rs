use teloxide::{prelude::*, utils::command::BotCommands};

use crate::bot_state::BotState;
use crate::dialog;
use crate::errors::HandlerResult;
use crate::handlers::utils::{main_menu_keyboard, send_replies, sender};

use crate::Command;

pub async fn command_handler(
    bot: Bot,
    upd: Update,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> HandlerResult {
    let Some(customer) = sender(&upd) else {
        return Ok(());
    };
    log::info!("{} sent /{:?}", customer.user_id, cmd);

    let replies = match cmd {
        Command::Start => dialog::handle_start(&state, &customer).await,
        Command::Help => return handle_help(bot, msg).await,
        Command::Agenda => dialog::show_agenda(&state).await,
        Command::Cancel => dialog::handle_cancel(&state, &customer).await,
    };

    send_replies(&bot, msg.chat.id, replies).await
}

async fn handle_help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        format!(
            "{}\n\nYou can also type \"book\" to start, \"agenda\" to see today's bookings \
             and \"thanks\" when you are done.",
            Command::descriptions()
        ),
    )
    .reply_markup(main_menu_keyboard())
    .await?;

    Ok(())
}
