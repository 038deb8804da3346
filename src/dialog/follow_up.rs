use crate::bot_state::BotState;
use crate::models::{Customer, DialogState};

use super::flow::start_dialog;
use super::{expired_menu, goodbye, Menu, Reply};

const OPTIONS_TEXT: &str = "Type:\n1. Reschedule\n2. Talk to reception\n3. Finish";

pub async fn handle_thanks(state: &BotState, customer: &Customer) -> Vec<Reply> {
    state.save_session(customer.user_id, DialogState::AwaitingFollowUp).await;
    vec![Reply::with_menu(
        "You're welcome! Is there anything else I can help you with?",
        Menu::YesNo,
    )]
}

pub async fn handle_follow_up_answer(state: &BotState, customer: &Customer, answer: &str) -> Vec<Reply> {
    if answer.trim().eq_ignore_ascii_case("yes") {
        state.save_session(customer.user_id, DialogState::AwaitingOption).await;
        vec![Reply::with_menu(OPTIONS_TEXT, Menu::Options)]
    } else {
        state.reset_session(customer.user_id).await;
        vec![goodbye()]
    }
}

pub async fn handle_option(state: &BotState, customer: &Customer, choice: &str) -> Vec<Reply> {
    if state.get_session(customer.user_id).await != DialogState::AwaitingOption {
        return vec![expired_menu()];
    }

    match choice.trim() {
        "1" => start_dialog(state, customer, true).await,
        "2" => {
            log::info!("☎️ {} ({}) asked for the reception", customer.name, customer.user_id);
            state.reset_session(customer.user_id).await;
            vec![Reply::text(
                "You're on hold. Someone from reception will contact you shortly.",
            )]
        }
        "3" => {
            state.reset_session(customer.user_id).await;
            vec![goodbye()]
        }
        _ => vec![Reply::with_menu(
            format!("❌ Invalid option. Please choose a valid option.\n{}", OPTIONS_TEXT),
            Menu::Options,
        )],
    }
}
