use std::time::Duration;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::thresholds::format_duration;
use crate::db::queries::guild_config;

/// Show the active auto-moderation and anti-nuke limits
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn automod(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let config = guild_config::get_or_create(&ctx.data().pool, guild_id.get() as i64).await?;
    let m = ctx.data().moderation();

    let state = |on: bool| if on { "enabled" } else { "disabled" };
    let window = format_duration(Duration::from_millis(m.antinuke_window_ms));

    let automod_lines = vec![
        format!(
            "Spam: {} messages in {}",
            m.spam_threshold,
            format_duration(Duration::from_millis(m.spam_interval_ms))
        ),
        format!("Mentions: more than {} per message", m.max_mentions),
        format!(
            "Caps: {}% or more uppercase above {} characters",
            m.caps_percent, m.caps_min_length
        ),
        format!("Repeats: {} identical characters in a row", m.repeat_run),
        format!("Emojis: more than {} per message", m.max_emojis),
        format!("Blocked words: {}", m.blocked_words.len()),
        format!(
            "Timeout after {} warnings for {}",
            m.mute_threshold,
            format_duration(m.mute_duration())
        ),
    ];

    let antinuke_lines = vec![
        format!("Bans: {} in {}", m.ban_threshold, window),
        format!("Kicks: {} in {}", m.kick_threshold, window),
        format!("Channel deletes: {} in {}", m.channel_delete_threshold, window),
        format!("Role deletes: {} in {}", m.role_delete_threshold, window),
    ];

    let mod_log = config
        .mod_log_channel()
        .map(|id| format!("<#{}>", id))
        .unwrap_or_else(|| "not set".to_string());

    let embed = embeds::standard_embed()
        .title("Moderation Settings")
        .description(format!("**Mod log:** {}", mod_log))
        .field(
            format!("Automod ({})", state(config.automod_enabled)),
            embeds::bullet_list(&automod_lines),
            false,
        )
        .field(
            format!("Anti-Nuke ({})", state(config.antinuke_enabled)),
            embeds::bullet_list(&antinuke_lines),
            false,
        );

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
