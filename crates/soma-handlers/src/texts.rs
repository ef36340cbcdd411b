// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Screen texts. HTML tags follow Telegram's HTML parse mode.

pub const WELCOME: &str = "\
👋 Hello, {first_name}!

Welcome to <b>Soma</b> — your space for breath, body, and mind practices.

Pick a lab below to start, or open the materials library with a subscription.";

pub const MAIN_MENU: &str = "🏠 <b>Main menu</b>\n\nWhere would you like to go?";

pub const RECOVERY_RESET: &str = "\
🔄 <b>Recovery Reset</b>

A three-day program to reconnect with your body and breath.
Pick a day to see its practices.";

pub const BREATH_LAB: &str = "\
🌬 <b>Breath Lab</b>

Breathing practices for recovery, balance, and activation.";

pub const BODY_LAB: &str = "\
💆 <b>Body Lab</b>

Gentle work with the diaphragm, belly, pelvic floor, and joints.";

pub const CORE_LAB: &str = "\
🧘 <b>Core Lab</b>

Neck, thoracic, lumbar, and center support practices.";

pub const MIND_LAB: &str = "\
🧠 <b>Mind Lab</b>

Relaxation, meditation, and attention practices.";

pub const PRACTICE_PLACEHOLDER: &str =
    "<i>Practices for this section are being added. Check back soon.</i>";

pub const PROBLEMS_INTRO: &str = "\
🤕 <b>What's bothering you?</b>

Pick the closest match and we'll suggest where to start.";

pub const CONTACTS: &str = "\
📬 <b>Contacts</b>

Questions, feedback, collaboration:
✉️ hello@soma.example
💬 @soma_support";

pub const REVIEWS: &str = "\
⭐ <b>Reviews</b>

What practitioners say:

«Three weeks in and my sleep is finally back.» — Maria
«The breath practices got me through a brutal season.» — Pavel

Want to share yours? Tap below.";

pub const LEAVE_REVIEW: &str = "\
✍️ <b>Leave a review</b>

Send your review to @soma_support and we'll publish it with your consent.";

pub const BOOKING: &str = "\
📅 <b>Book a consultation</b>

A one-on-one session to build your personal recovery plan.
Tap below and the operator will contact you.";

pub const BOOKING_CONFIRMED: &str = "\
✅ <b>Request received!</b>

The operator will contact you shortly to agree on a time.";

pub const INFO: &str = "ℹ️ <b>Information</b>\n\nWhat would you like to know?";

pub const INFO_ABOUT: &str = "\
📖 <b>About the project</b>

Soma is a library of short, practical recovery routines:
breathing, gentle movement, and attention work.";

pub const INFO_HOW: &str = "\
📚 <b>How to use the bot</b>

1. Pick a lab from the main menu — labs are free.
2. The materials library opens with a subscription.
3. Stuck? Use «Book a consultation».";

pub const INFO_FAQ: &str = "\
❓ <b>FAQ</b>

<b>Is a subscription required?</b>
Labs are free. The materials library needs an active subscription.

<b>How long does activation take?</b>
Usually 5–10 minutes after the operator verifies your payment.";

pub const INFO_AUTHOR: &str = "\
👤 <b>About the author</b>

Certified breath and movement coach, ten years of practice.";

pub const MATERIALS_OVERVIEW: &str = "\
📚 <b>Materials library</b>

Videos, articles, and audio practices. Browse by format, theme, or
popularity.";

pub const MATERIALS_SEARCH_UNAVAILABLE: &str =
    "🔍 Search is not available yet. Browse by format or theme instead.";

pub const MATERIAL_NOT_FOUND: &str = "This material is no longer available.";

pub const PAYMENT_CLAIMED: &str = "\
✅ <b>Request received!</b>

The operator will verify the payment and activate your subscription
within a few minutes. You'll get a message when access opens.";

pub const SUBSCRIPTION_GRANTED: &str = "\
🎉 <b>Subscription active!</b>

The materials library is now open. Enjoy your practice!";

pub const UNKNOWN_ACTION: &str = "🤔 I didn't recognize that. Use the menu below.";

pub fn welcome(first_name: Option<&str>) -> String {
    WELCOME.replace("{first_name}", first_name.unwrap_or("friend"))
}

pub fn subscription_offer(price_rub: u32, duration_days: i64) -> String {
    format!(
        "💰 <b>Subscription</b>\n\n\
         Unlimited access to the full materials library:\n\
         ✅ 50+ video practices\n\
         ✅ 30+ articles and methods\n\
         ✅ 20+ audio meditations\n\
         ✅ New materials every week\n\n\
         <b>Price:</b> {price_rub}₽ / month\n\
         <b>Duration:</b> {duration_days} days"
    )
}

pub fn subscription_details(price_rub: u32, duration_days: i64) -> String {
    format!(
        "📦 <b>Subscription details</b>\n\n\
         <b>Price:</b> {price_rub}₽ per month\n\
         <b>Duration:</b> {duration_days} days\n\n\
         <b>How to pay:</b>\n\
         1. Tap «Pay»\n\
         2. Transfer {price_rub}₽ using the listed details\n\
         3. Tap «I paid»\n\
         4. Access opens after the operator verifies the payment\n\n\
         <i>💡 Payments are verified manually for now.</i>"
    )
}

pub fn payment_requisites(price_rub: u32, duration_days: i64) -> String {
    format!(
        "💳 <b>Payment</b>\n\n\
         <b>Amount:</b> {price_rub}₽\n\
         <b>Duration:</b> {duration_days} days\n\n\
         <b>Payment details:</b>\n\
         📱 Card: <code>XXXX XXXX XXXX XXXX</code>\n\n\
         <b>After paying, tap «I paid»</b>\n\n\
         <i>The operator verifies the payment and activates the\n\
         subscription within a few minutes.</i>"
    )
}

pub fn gate_screen(price_rub: u32, duration_days: i64) -> String {
    format!(
        "🔒 <b>This section needs a subscription</b>\n\n{}",
        subscription_offer(price_rub, duration_days)
    )
}

pub fn problem_acknowledged(title: &str, lab_hint: &str) -> String {
    format!(
        "Got it — <b>{title}</b>.\n\n\
         Start with {lab_hint}. For a personal plan, book a consultation."
    )
}
