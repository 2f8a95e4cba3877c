use serenity::all::{Context, GuildId, UserId};
use tracing::info;

use crate::bot::error::Error;
use crate::utils::formatting::truncate;

/// Discord caps audit log reasons at 512 characters
const MAX_AUDIT_REASON: usize = 512;

/// Ban a member from the guild without deleting their messages
pub async fn ban_member(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
    reason: &str,
) -> Result<(), Error> {
    let reason = truncate(reason, MAX_AUDIT_REASON);

    guild_id
        .ban_with_reason(&ctx.http, user_id, 0, &reason)
        .await?;

    info!("Banned user {} from guild {} ({})", user_id, guild_id, reason);

    Ok(())
}

/// Lift a guild ban
pub async fn unban_member(ctx: &Context, guild_id: GuildId, user_id: UserId) -> Result<(), Error> {
    guild_id.unban(&ctx.http, user_id).await?;

    info!("Unbanned user {} in guild {}", user_id, guild_id);

    Ok(())
}
