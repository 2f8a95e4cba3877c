use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::db::models::ModAction;

// ============================================================================
// Color Palette
// ============================================================================

pub const PRIMARY_COLOR: Colour = Colour::from_rgb(59, 130, 246);
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(16, 185, 129);
pub const ERROR_COLOR: Colour = Colour::from_rgb(244, 63, 94);
pub const WARNING_COLOR: Colour = Colour::from_rgb(245, 158, 11);

/// Anti-nuke alerts - Deep red
pub const CRITICAL_COLOR: Colour = Colour::from_rgb(185, 28, 28);

pub const BULLET: &str = "•";

const FOOTER: &str = "Warden • Moderation";

// ============================================================================
// Embed Builders
// ============================================================================

pub fn standard_embed() -> CreateEmbed {
    CreateEmbed::new().color(PRIMARY_COLOR)
}

pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

pub fn error_embed() -> CreateEmbed {
    CreateEmbed::new().color(ERROR_COLOR)
}

pub fn warning_embed() -> CreateEmbed {
    CreateEmbed::new().color(WARNING_COLOR)
}

/// Entry posted to a guild's mod log channel
pub fn mod_log_embed(action: ModAction, user_id: u64, moderator_id: u64, reason: &str) -> CreateEmbed {
    let color = match action {
        ModAction::Ban => CRITICAL_COLOR,
        ModAction::Timeout | ModAction::Warn | ModAction::MessageDelete => WARNING_COLOR,
        ModAction::Unban | ModAction::ClearWarnings => SUCCESS_COLOR,
    };

    CreateEmbed::new()
        .color(color)
        .title(format!("Moderation: {}", action))
        .field("User", format!("<@{}> (`{}`)", user_id, user_id), true)
        .field("Moderator", format!("<@{}>", moderator_id), true)
        .field("Reason", reason, false)
        .footer(CreateEmbedFooter::new(FOOTER))
        .timestamp(Timestamp::now())
}

/// Format a list of items with bullet points
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", BULLET, item))
        .collect::<Vec<_>>()
        .join("\n")
}
