// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lab screens: the free themed practice families.

use soma_core::Reply;

use crate::{menus, texts};

/// Route a lab-family action to its screen.
pub fn handle(action: &str) -> Reply {
    match action {
        "lab_recovery" => {
            Reply::text(texts::RECOVERY_RESET).with_menu(menus::recovery_reset_menu())
        }
        "lab_breath" => Reply::text(texts::BREATH_LAB).with_menu(menus::breath_lab_menu()),
        "lab_body" => Reply::text(texts::BODY_LAB).with_menu(menus::body_lab_menu()),
        "lab_core" => Reply::text(texts::CORE_LAB).with_menu(menus::core_lab_menu()),
        "lab_mind" => Reply::text(texts::MIND_LAB).with_menu(menus::mind_lab_menu()),
        a if a.starts_with("recovery_day") => recovery_day(a),
        a if a.starts_with("breath_") => category(a, "lab_breath", breath_title(a)),
        a if a.starts_with("body_") => category(a, "lab_body", body_title(a)),
        a if a.starts_with("core_") => category(a, "lab_core", core_title(a)),
        a if a.starts_with("mind_") => category(a, "lab_mind", mind_title(a)),
        a if a.starts_with("practice_") => {
            Reply::text(texts::PRACTICE_PLACEHOLDER).with_menu(menus::back_to_menu())
        }
        _ => crate::menu::unknown(),
    }
}

fn recovery_day(action: &str) -> Reply {
    let day = action.trim_start_matches("recovery_day");
    let description = match day {
        "1" => "Meeting your body and breath",
        "2" => "Deepening the practice",
        "3" => "Integration and consolidation",
        _ => "",
    };
    let text = format!(
        "📅 <b>Recovery Reset — Day {day}</b>\n\n{description}\n\n{}",
        texts::PRACTICE_PLACEHOLDER
    );
    Reply::text(text).with_menu(menus::back_button("lab_recovery", "🔙 Back to days"))
}

fn category(_action: &str, back: &str, title: &str) -> Reply {
    let text = format!("<b>{title}</b>\n\n{}", texts::PRACTICE_PLACEHOLDER);
    Reply::text(text).with_menu(menus::back_button(back, "🔙 Back"))
}

fn breath_title(action: &str) -> &'static str {
    match action {
        "breath_recovery" => "🌊 Recovery breathing",
        "breath_balance" => "⚖️ Balancing breathing",
        "breath_activating" => "⚡ Activating breathing",
        "breath_body" => "💫 Breath with movement",
        _ => "Breathing practices",
    }
}

fn body_title(action: &str) -> &'static str {
    match action {
        "body_diaphragm" => "🫁 Diaphragm and ribs",
        "body_belly" => "🤰 Belly",
        "body_pelvic" => "🌸 Pelvic floor",
        "body_mobility" => "🌊 Gentle mobilization",
        "body_joints" => "🦴 Joint mobility",
        "body_whole" => "✨ Whole body",
        _ => "Body practices",
    }
}

fn core_title(action: &str) -> &'static str {
    match action {
        "core_neck" => "🦒 Neck and head",
        "core_thoracic" => "🫀 Thoracic",
        "core_lumbar" => "🌀 Lumbar",
        "core_center" => "⚓ Center and support",
        "core_joints" => "🦴 Joints",
        "core_integrity" => "🌟 Whole-body integrity",
        _ => "Core practices",
    }
}

fn mind_title(action: &str) -> &'static str {
    match action {
        "mind_relaxation" => "🌙 Relaxation",
        "mind_meditation" => "🧘‍♀️ Meditation",
        "mind_state" => "🌈 Working with state",
        "mind_attention" => "🎯 Returning attention",
        _ => "Mind practices",
    }
}
