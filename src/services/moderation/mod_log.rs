use std::sync::Arc;

use serenity::all::{ChannelId, Context, CreateMessage, GuildId, UserId};
use tracing::{debug, warn};

use crate::bot::data::Data;
use crate::constants::embeds;
use crate::db::models::ModAction;
use crate::db::queries::{guild_config, mod_log};

/// Persist a moderation action and mirror it to the guild's mod log channel.
/// Both steps are best-effort and only logged on failure.
pub async fn record(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    moderator_id: UserId,
    action: ModAction,
    reason: &str,
) {
    if let Err(e) = mod_log::create(
        &data.pool,
        guild_id.get() as i64,
        user_id.get() as i64,
        moderator_id.get() as i64,
        action,
        reason,
    )
    .await
    {
        warn!(
            "Failed to store mod log entry ({} on {} in guild {}): {:?}",
            action, user_id, guild_id, e
        );
    }

    let channel_id = match guild_config::get(&data.pool, guild_id.get() as i64).await {
        Ok(config) => config.and_then(|c| c.mod_log_channel()),
        Err(e) => {
            warn!("Failed to load guild config for {}: {:?}", guild_id, e);
            None
        }
    };

    let Some(channel_id) = channel_id else {
        debug!("No mod log channel configured for guild {}", guild_id);
        return;
    };

    let embed = embeds::mod_log_embed(action, user_id.get(), moderator_id.get(), reason);
    if let Err(e) = ChannelId::new(channel_id)
        .send_message(ctx, CreateMessage::new().embed(embed))
        .await
    {
        warn!("Failed to post to mod log channel {}: {:?}", channel_id, e);
    }
}
