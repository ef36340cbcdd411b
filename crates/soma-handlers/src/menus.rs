// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu layouts. Transport-neutral; the Telegram adapter renders these as
//! inline keyboards.

use soma_core::{Button, Menu};

fn row(label: &str, action: &str) -> Vec<Button> {
    vec![Button::new(label, action)]
}

/// Main menu: the labs, info, materials, and the subscription offer.
pub fn main_menu() -> Menu {
    Menu::new(vec![
        row("🔄 Recovery Reset", "lab_recovery"),
        row("🌬 Breath Lab", "lab_breath"),
        row("💆 Body Lab", "lab_body"),
        row("🧘 Core Lab", "lab_core"),
        row("🧠 Mind Lab", "lab_mind"),
        row("📚 Materials library", "materials"),
        row("🤕 I have a problem", "problems"),
        row("ℹ️ Information", "info"),
        row("💰 Subscribe", "subscribe"),
    ])
}

/// Single "back" button.
pub fn back_button(action: &str, label: &str) -> Menu {
    Menu::new(vec![row(label, action)])
}

pub fn back_to_menu() -> Menu {
    back_button("menu", "🏠 Main menu")
}

pub fn recovery_reset_menu() -> Menu {
    Menu::new(vec![
        row("📅 Day 1", "recovery_day1"),
        row("📅 Day 2", "recovery_day2"),
        row("📅 Day 3", "recovery_day3"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn breath_lab_menu() -> Menu {
    Menu::new(vec![
        row("🌊 Recovery breathing", "breath_recovery"),
        row("⚖️ Balancing breathing", "breath_balance"),
        row("⚡ Activating breathing", "breath_activating"),
        row("💫 Breath with movement", "breath_body"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn body_lab_menu() -> Menu {
    Menu::new(vec![
        row("🫁 Diaphragm and ribs", "body_diaphragm"),
        row("🤰 Belly", "body_belly"),
        row("🌸 Pelvic floor", "body_pelvic"),
        row("🌊 Gentle mobilization", "body_mobility"),
        row("🦴 Joint mobility", "body_joints"),
        row("✨ Whole body", "body_whole"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn core_lab_menu() -> Menu {
    Menu::new(vec![
        row("🦒 Neck and head", "core_neck"),
        row("🫀 Thoracic", "core_thoracic"),
        row("🌀 Lumbar", "core_lumbar"),
        row("⚓ Center and support", "core_center"),
        row("🦴 Joints", "core_joints"),
        row("🌟 Whole-body integrity", "core_integrity"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn mind_lab_menu() -> Menu {
    Menu::new(vec![
        row("🌙 Relaxation", "mind_relaxation"),
        row("🧘‍♀️ Meditation", "mind_meditation"),
        row("🌈 Working with state", "mind_state"),
        row("🎯 Returning attention", "mind_attention"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn info_menu() -> Menu {
    Menu::new(vec![
        row("📖 About the project", "info_about"),
        row("📚 How to use", "info_how"),
        row("❓ FAQ", "info_faq"),
        row("👤 About the author", "info_author"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn problems_menu() -> Menu {
    Menu::new(vec![
        row("😴 Poor sleep", "problem_sleep"),
        row("😰 Stress and anxiety", "problem_stress"),
        row("🔋 No energy", "problem_energy"),
        row("🎯 Can't focus", "problem_focus"),
        row("💢 Body tension", "problem_tension"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn materials_menu() -> Menu {
    Menu::new(vec![
        row("🗂 By format", "materials_format"),
        row("🏷 By theme", "materials_theme"),
        row("🔥 Popular", "materials_popular"),
        row("🔍 Search", "materials_search"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn materials_format_menu() -> Menu {
    Menu::new(vec![
        row("🎥 Video", "format_video"),
        row("📄 Articles", "format_article"),
        row("🎧 Audio", "format_audio"),
        row("🔙 Back", "materials"),
    ])
}

/// List of materials as buttons, with a back target.
pub fn materials_list(items: &[(u32, &str)], back_action: &str) -> Menu {
    let mut rows: Vec<Vec<Button>> = items
        .iter()
        .map(|(id, title)| row(&format!("▶️ {title}"), &format!("get_material_{id}")))
        .collect();
    rows.push(row("🔙 Back", back_action));
    Menu::new(rows)
}

pub fn subscription_menu(price_rub: u32) -> Menu {
    Menu::new(vec![
        vec![Button::new(format!("💳 Pay {price_rub}₽"), "pay")],
        row("📦 Details", "subscribe_info"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn payment_menu() -> Menu {
    Menu::new(vec![
        row("✅ I paid", "payment_confirm"),
        row("❌ Cancel", "menu"),
    ])
}

pub fn booking_menu() -> Menu {
    Menu::new(vec![
        row("📅 Request a consultation", "booking_form"),
        row("🏠 Main menu", "menu"),
    ])
}

pub fn admin_menu() -> Menu {
    Menu::new(vec![
        row("📊 Statistics", "admin_stats"),
        row("👥 Users", "admin_users"),
        row("📤 Broadcast", "admin_broadcast"),
        row("🏠 Main menu", "menu"),
    ])
}
