use crate::bot_state::BotState;
use crate::errors::BookingError;
use crate::models::{Booking, Customer, DialogState, Service, TimeSlot};

use super::{expired_menu, goodbye, Menu, Reply};

/// Starts (or restarts) the dialog and shows the service menu. Existing
/// bookings are left alone.
pub async fn handle_start(state: &BotState, customer: &Customer) -> Vec<Reply> {
    start_dialog(state, customer, false).await
}

pub(super) async fn start_dialog(state: &BotState, customer: &Customer, rescheduling: bool) -> Vec<Reply> {
    state
        .save_session(customer.user_id, DialogState::AwaitingService { rescheduling })
        .await;
    vec![service_menu("✂️ Choose the number of the service you want:")]
}

pub async fn handle_service_selection(state: &BotState, customer: &Customer, choice: &str) -> Vec<Reply> {
    let rescheduling = match state.get_session(customer.user_id).await {
        DialogState::AwaitingService { rescheduling } => rescheduling,
        _ => return vec![expired_menu()],
    };

    let service = match Service::from_choice(choice) {
        Ok(service) => service,
        Err(e) => {
            log::debug!("{} sent {}", customer.user_id, e);
            return vec![service_menu(&e.user_message())];
        }
    };

    let slots = open_slots(state, rescheduling.then_some(customer)).await;
    if slots.is_empty() {
        state.save_session(customer.user_id, DialogState::Done).await;
        return vec![no_slots_left()];
    }

    state
        .save_session(customer.user_id, DialogState::AwaitingSlot { service, rescheduling })
        .await;
    vec![slot_menu(
        state,
        format!("{} it is. Open slots for today ({}):", service, state.today().format("%d.%m.%Y")),
        slots,
    )]
}

pub async fn handle_slot_selection(state: &BotState, customer: &Customer, text: &str) -> Vec<Reply> {
    let (service, rescheduling) = match state.get_session(customer.user_id).await {
        DialogState::AwaitingSlot { service, rescheduling } => (service, rescheduling),
        _ => return vec![expired_menu()],
    };

    let slot = match state.hours().validate(text, state.now()) {
        Ok(slot) => slot,
        Err(e) => return retry_slot(state, customer, rescheduling, e).await,
    };

    let booking = Booking::new(customer, service, state.today(), slot, state.now());
    let confirmation = if rescheduling {
        match state.schedule().rebook(booking).await {
            Ok(released) => {
                let mut text = format!("✅ Rescheduled: {} - {} at {}", customer.name, service, slot);
                for previous in released.iter().filter(|previous| previous.slot != slot) {
                    text.push_str(&format!("\nYour {} booking was released.", previous.slot));
                }
                text
            }
            Err(e) => return retry_slot(state, customer, rescheduling, e).await,
        }
    } else {
        match state.schedule().book(booking).await {
            Ok(()) => format!("✅ Booked: {} - {} at {}", customer.name, service, slot),
            Err(e) => return retry_slot(state, customer, rescheduling, e).await,
        }
    };

    state.save_session(customer.user_id, DialogState::Done).await;
    vec![Reply::with_menu(confirmation, Menu::Main), goodbye()]
}

/// Ends the current dialog without touching bookings.
pub async fn handle_cancel(state: &BotState, customer: &Customer) -> Vec<Reply> {
    state.reset_session(customer.user_id).await;
    vec![Reply::with_menu(
        "Booking cancelled. Type \"book\" whenever you want to start again.",
        Menu::Main,
    )]
}

pub async fn show_agenda(state: &BotState) -> Vec<Reply> {
    let bookings = state.schedule().bookings_on(state.today()).await;
    if bookings.is_empty() {
        return vec![Reply::text("There are no bookings for today.")];
    }

    let lines: Vec<String> = bookings.iter().map(Booking::agenda_line).collect();
    vec![Reply::text(format!("📋 Today's bookings:\n{}", lines.join("\n")))]
}

/// Hourly slots that are neither booked nor already past. Slots held by
/// `rescheduling` stay on offer, since that customer may keep them.
pub async fn open_slots(state: &BotState, rescheduling: Option<&Customer>) -> Vec<TimeSlot> {
    let booked: Vec<TimeSlot> = state
        .schedule()
        .bookings_on(state.today())
        .await
        .into_iter()
        .filter(|booking| rescheduling.map_or(true, |customer| booking.user_id != customer.user_id))
        .map(|booking| booking.slot)
        .collect();
    let now = state.now().time();
    state
        .hours()
        .hourly_slots()
        .into_iter()
        .filter(|slot| slot.time() > now && !booked.contains(slot))
        .collect()
}

async fn retry_slot(
    state: &BotState,
    customer: &Customer,
    rescheduling: bool,
    error: BookingError,
) -> Vec<Reply> {
    log::debug!("{} sent {}", customer.user_id, error);
    let slots = open_slots(state, rescheduling.then_some(customer)).await;
    if slots.is_empty() {
        state.save_session(customer.user_id, DialogState::Done).await;
        return vec![Reply::text(error.user_message()), no_slots_left()];
    }
    vec![slot_menu(state, error.user_message(), slots)]
}

fn service_menu(intro: &str) -> Reply {
    Reply::with_menu(format!("{}\n{}", intro, Service::menu_text()), Menu::Services)
}

fn slot_menu(state: &BotState, intro: String, slots: Vec<TimeSlot>) -> Reply {
    Reply::with_menu(
        format!(
            "{}\nPick one below or type a time {}.",
            intro,
            state.hours().describe()
        ),
        Menu::Slots(slots),
    )
}

fn no_slots_left() -> Reply {
    Reply::with_menu("😔 Sorry, there are no open slots left for today.", Menu::Main)
}
