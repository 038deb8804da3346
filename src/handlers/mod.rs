pub mod commands;
pub mod messages;
pub mod callbacks;
pub mod utils;

pub use commands::command_handler;
pub use messages::message_handler;
pub use callbacks::callback_handler;

use tokio::time;
use crate::bot_state::BotState;

pub async fn maintenance_task(state: BotState, every: time::Duration) {
    let mut interval = time::interval(every);

    loop {
        interval.tick().await;
        state.run_maintenance().await;
    }
}
