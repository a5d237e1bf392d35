//! Conversation texts and menus
//!
//! Every message the bot shows, as HTML, together with its inline keyboard.
//! User-supplied strings are escaped before they are embedded.

use super::action::{Action, Service, TutorOption};
use super::effect::{Button, Keyboard, Reply};
use super::event::User;
use super::state::{RequestOrigin, Session};
use crate::catalog::COUNTRIES;
use crate::pricing::PriceTable;
use html_escape::{encode_double_quoted_attribute, encode_text};

const NOT_PROVIDED: &str = "N/A";

// ─────────────────────────────────────────────────────────────────────────────
// Menus
// ─────────────────────────────────────────────────────────────────────────────

/// Welcome text with the country menu, two countries per row.
#[must_use]
pub fn country_menu() -> Reply {
    let rows = COUNTRIES
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|country| Button::new(country.label, Action::Country(country)))
                .collect::<Vec<_>>()
        })
        .collect();

    Reply::text(
        "Welcome to MikroTechAcademy! 🤖\n\nPlease select the country where you are studying:",
    )
    .with_keyboard(Keyboard::new(rows))
}

/// Services menu echoing the selected country.
#[must_use]
pub fn service_menu(country_name: &str) -> Reply {
    let keyboard = Keyboard::new(vec![
        vec![Button::new(
            "📝 Assignment / Project Help",
            Action::Service(Service::Assignment),
        )],
        vec![Button::new(
            "🧑‍🏫 Private Lessons",
            Action::Service(Service::Lesson),
        )],
        vec![Button::new(
            "💬 Connect with a Tutor",
            Action::Service(Service::Tutor),
        )],
        vec![Button::new(
            "💷 Prices and Info",
            Action::Service(Service::Info),
        )],
        vec![Button::new("⬅️ Change Country", Action::ChangeCountry)],
    ]);

    Reply::text(format!(
        "You've selected <b>{}</b>.\n\nHow can I help you today?",
        encode_text(country_name)
    ))
    .with_keyboard(keyboard)
}

/// Tutor connection options.
#[must_use]
pub fn tutor_menu() -> Reply {
    let keyboard = Keyboard::new(vec![
        vec![Button::new(
            "📄 Fill Info Form",
            Action::Tutor(TutorOption::FillForm),
        )],
        vec![Button::new(
            "📲 Connect via Telegram",
            Action::Tutor(TutorOption::DirectConnect),
        )],
        vec![back_to_services_button()],
    ]);

    Reply::text("How would you like to connect with a tutor?").with_keyboard(keyboard)
}

fn back_to_services_button() -> Button {
    Button::new("⬅️ Back to Services", Action::BackToServices)
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompts
// ─────────────────────────────────────────────────────────────────────────────

/// Ask for the assignment.
#[must_use]
pub fn assignment_prompt() -> Reply {
    Reply::text(
        "Please upload a file, an image, or type a description of the assignment.\n\n\
         To go back, press /cancel.",
    )
}

/// First step of the detail form.
#[must_use]
pub fn name_prompt() -> Reply {
    Reply::text("Of course. Let's get a few details.\n\nFirst, what is your full name?")
}

/// Second step of the detail form.
#[must_use]
pub fn phone_prompt() -> Reply {
    Reply::text("Thanks! What is your phone number? (Include country code)")
}

/// Third step of the detail form.
#[must_use]
pub fn subject_prompt() -> Reply {
    Reply::text("Perfect. And what subject do you need help with?")
}

// ─────────────────────────────────────────────────────────────────────────────
// Prices
// ─────────────────────────────────────────────────────────────────────────────

/// Price table for the user's country.
#[must_use]
pub fn price_info(country_name: &str, prices: &PriceTable) -> Reply {
    let currency = encode_text(&prices.currency);
    let text = format!(
        "💰 <b>Pricing &amp; Info ({})</b>\n\n\
         🔹 <b>Individual:</b> <code>{} {currency}</code>\n\
         🔹 <b>Group (2-3):</b> <code>{} {currency}</code> /student\n\
         🔹 <b>Group (4+):</b> <code>{} {currency}</code> /student\n\n\
         ℹ️ <b>Info</b>\n\
         — Lessons are online via Zoom.\n\
         — UK flexible payment options.\n\
         — Completion certificates available.",
        encode_text(country_name),
        prices.individual,
        prices.small_group,
        prices.large_group,
    );
    Reply::text(text).with_keyboard(Keyboard::new(vec![vec![back_to_services_button()]]))
}

/// Shown when the country's currency has no rate.
#[must_use]
pub fn pricing_unavailable() -> Reply {
    Reply::text("Sorry, pricing information for your region is currently unavailable.")
        .with_keyboard(Keyboard::new(vec![vec![back_to_services_button()]]))
}

// ─────────────────────────────────────────────────────────────────────────────
// Confirmations
// ─────────────────────────────────────────────────────────────────────────────

/// Assignment relayed to the admin.
#[must_use]
pub fn assignment_received() -> Reply {
    Reply::text("✅ Thank you! Your assignment has been sent. A tutor will contact you shortly.")
}

/// Detail form relayed to the admin.
#[must_use]
pub fn request_sent() -> Reply {
    Reply::text("✅ All set! We've sent your request. A tutor will be in touch shortly.")
        .removing_keyboard()
}

/// Direct connection requested.
#[must_use]
pub fn direct_connect_sent() -> Reply {
    Reply::text(
        "✅ The admin has been notified!\n\nA tutor will contact you directly on Telegram shortly.",
    )
}

/// Conversation cancelled.
#[must_use]
pub fn cancelled() -> Reply {
    Reply::text("Operation cancelled. Type /start to begin again.").removing_keyboard()
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin notifications
// ─────────────────────────────────────────────────────────────────────────────

/// Sent to the admin right before the assignment itself is forwarded.
#[must_use]
pub fn assignment_notice(user: &User, country_name: &str) -> String {
    format!(
        "🔔 <b>New Assignment</b>\n\n<b>From:</b> {} (<code>{}</code>)\n<b>Country:</b> {}",
        encode_text(&user.first_name),
        user.id,
        encode_text(country_name),
    )
}

/// Completed detail form.
#[must_use]
pub fn request_notice(session: &Session, user: &User) -> String {
    let origin = session.origin.unwrap_or(RequestOrigin::Lesson);
    let field = |value: &Option<String>| {
        encode_text(value.as_deref().unwrap_or(NOT_PROVIDED)).into_owned()
    };

    format!(
        "🔔 <b>New {}!</b>\n\n\
         <b>Name:</b> {}\n\
         <b>Phone:</b> {}\n\
         <b>Subject:</b> {}\n\
         <b>Country:</b> {}\n\
         <b>User ID:</b> <code>{}</code>",
        origin.title(),
        field(&session.name),
        field(&session.phone),
        field(&session.subject),
        encode_text(session.country_name()),
        user.id,
    )
}

/// Platform deep link that opens a chat with `user_id`.
#[must_use]
pub fn user_deep_link(user_id: i64) -> String {
    format!("tg://user?id={user_id}")
}

/// Direct connection request with a clickable link to the user.
#[must_use]
pub fn direct_connect_notice(user: &User, country_name: &str) -> String {
    let name = encode_text(&user.first_name);
    format!(
        "🔔 <b>Direct Connection Request</b>\n\n\
         User <b>{name}</b> from <b>{}</b> wants to connect directly.\n\n\
         ➡️ <a href=\"{}\">Click here to chat with {name}</a>",
        encode_text(country_name),
        encode_double_quoted_attribute(&user_deep_link(user.id)),
    )
}
