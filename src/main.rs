use teloxide::{prelude::*, utils::command::BotCommands};
use std::sync::Arc;

mod bot_state;
mod clock;
mod config;
mod dialog;
mod errors;
mod handlers;
mod models;
mod schedule;

use crate::bot_state::BotState;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::handlers::{callback_handler, command_handler, message_handler};
use crate::schedule::InMemorySchedule;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
enum Command {
    #[command(description = "book an appointment")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "today's bookings")]
    Agenda,
    #[command(description = "stop the current booking")]
    Cancel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting salon booking bot...");

    let config = Config::from_env()?;
    log::info!(
        "✅ Config loaded: open {}, sessions expire after {:?}",
        config.hours.describe(),
        config.session_ttl
    );

    let state = BotState::new(
        Arc::new(InMemorySchedule::new()),
        Arc::new(SystemClock),
        config.hours,
        config.session_ttl,
    );

    // Background cleanup of idle sessions and previous days' bookings
    let state_clone = state.clone();
    let every = config.cleanup_interval;
    tokio::spawn(async move {
        handlers::maintenance_task(state_clone, every).await;
    });

    let bot = Bot::new(config.token);
    bot.set_my_commands(Command::bot_commands()).await?;

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler)
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Polling...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
