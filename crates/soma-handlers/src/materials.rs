// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Materials library: the gated content family.
//!
//! Every action here arrives with an access annotation. When the
//! annotation says a subscription is required, the handler presents the
//! offer screen instead of content; it never re-checks the store itself.

use soma_core::{AccessContext, Event, Reply, SomaError};
use tracing::info;

use crate::context::HandlerContext;
use crate::{menus, texts};

/// A library entry. Static catalog for now; ids are stable.
struct Material {
    id: u32,
    title: &'static str,
    format: &'static str,
    body: &'static str,
}

const CATALOG: &[Material] = &[
    Material {
        id: 1,
        title: "Morning breath reset",
        format: "video",
        body: "A 10-minute video practice to start the day with a calm, open chest.",
    },
    Material {
        id: 2,
        title: "Unwinding the lower back",
        format: "video",
        body: "Gentle lumbar release sequence. Move slowly, stay with the breath.",
    },
    Material {
        id: 3,
        title: "Why your jaw holds stress",
        format: "article",
        body: "A short read on jaw tension, its triggers, and three daily releases.",
    },
    Material {
        id: 4,
        title: "Evening wind-down",
        format: "audio",
        body: "A 15-minute guided audio practice for deeper sleep.",
    },
    Material {
        id: 5,
        title: "Box breathing basics",
        format: "article",
        body: "The four-count pattern, when to use it, and how to progress.",
    },
];

const POPULAR_IDS: [u32; 3] = [1, 4, 5];

/// Route a materials-family action.
pub async fn handle(
    ctx: &HandlerContext,
    event: &Event,
    access: &AccessContext,
) -> Result<Reply, SomaError> {
    // The gate screen replaces all library content for unsubscribed users.
    if access.requires_subscription {
        info!(user_id = event.user_id, action = %event.action, "showing subscription gate");
        let sub = &ctx.config.subscription;
        return Ok(
            Reply::text(texts::gate_screen(sub.price_rub, sub.duration_days))
                .with_menu(menus::subscription_menu(sub.price_rub))
                .with_toast("🔒 Subscription required"),
        );
    }

    let reply = match event.action.as_str() {
        "materials" => {
            Reply::text(texts::MATERIALS_OVERVIEW).with_menu(menus::materials_menu())
        }
        "materials_format" => Reply::text("🗂 <b>Pick a format</b>")
            .with_menu(menus::materials_format_menu()),
        "materials_theme" => theme_list(),
        "materials_popular" => popular_list(),
        "materials_search" => {
            Reply::text(texts::MATERIALS_SEARCH_UNAVAILABLE).with_menu(menus::back_button(
                "materials",
                "🔙 Back",
            ))
        }
        a if a.starts_with("format_") => format_list(a.trim_start_matches("format_")),
        a if a.starts_with("get_material_") => {
            return get_material(ctx, event).await;
        }
        _ => crate::menu::unknown(),
    };
    Ok(reply)
}

fn format_list(format: &str) -> Reply {
    let items: Vec<(u32, &str)> = CATALOG
        .iter()
        .filter(|m| m.format == format)
        .map(|m| (m.id, m.title))
        .collect();
    if items.is_empty() {
        return Reply::text("Nothing in this format yet.")
            .with_menu(menus::back_button("materials_format", "🔙 Back"));
    }
    let label = match format {
        "video" => "🎥 Video",
        "article" => "📄 Articles",
        "audio" => "🎧 Audio",
        other => other,
    };
    Reply::text(format!("<b>{label}</b>\n\nPick a material:"))
        .with_menu(menus::materials_list(&items, "materials_format"))
}

fn theme_list() -> Reply {
    // Themes map onto the labs; the catalog is small enough to show flat.
    let items: Vec<(u32, &str)> = CATALOG.iter().map(|m| (m.id, m.title)).collect();
    Reply::text("🏷 <b>All materials by theme</b>\n\nPick a material:")
        .with_menu(menus::materials_list(&items, "materials"))
}

fn popular_list() -> Reply {
    let items: Vec<(u32, &str)> = CATALOG
        .iter()
        .filter(|m| POPULAR_IDS.contains(&m.id))
        .map(|m| (m.id, m.title))
        .collect();
    Reply::text("🔥 <b>Most practiced this month</b>")
        .with_menu(menus::materials_list(&items, "materials"))
}

async fn get_material(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    let id: u32 = match event
        .action
        .trim_start_matches("get_material_")
        .parse()
    {
        Ok(id) => id,
        Err(_) => {
            return Ok(Reply::text(texts::MATERIAL_NOT_FOUND).with_menu(menus::back_to_menu()));
        }
    };

    let Some(material) = CATALOG.iter().find(|m| m.id == id) else {
        return Ok(Reply::text(texts::MATERIAL_NOT_FOUND).with_menu(menus::back_to_menu()));
    };

    // Count the view; a failed bump never blocks delivery.
    if let Err(e) = ctx
        .store
        .increment_counter(event.user_id, soma_core::CounterField::MaterialsViewed)
        .await
    {
        tracing::warn!(user_id = event.user_id, error = %e, "failed to count material view");
    }

    Ok(
        Reply::text(format!("<b>{}</b>\n\n{}", material.title, material.body))
            .with_menu(menus::back_button("materials", "🔙 Back to library"))
            .with_toast("✅ Enjoy your practice"),
    )
}
