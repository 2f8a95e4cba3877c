use std::time::Duration;

use serenity::all::{Context, EditMember, GuildId, UserId};
use tracing::{error, info};

use crate::bot::error::Error;

/// Longest communication timeout Discord accepts
pub const MAX_TIMEOUT: Duration = Duration::from_secs(28 * 24 * 60 * 60);

/// Disable a member's ability to talk for `duration`
pub async fn apply_timeout(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
    duration: Duration,
    reason: &str,
) -> Result<(), Error> {
    if duration.is_zero() || duration > MAX_TIMEOUT {
        return Err(Error::InvalidOperation(format!(
            "Timeout of {:?} is outside Discord's limits",
            duration
        )));
    }

    let until = chrono::Utc::now()
        + chrono::Duration::from_std(duration)
            .map_err(|e| Error::InvalidOperation(format!("Invalid timeout duration: {}", e)))?;

    let edit = EditMember::new()
        .disable_communication_until(until.to_rfc3339())
        .audit_log_reason(reason);

    match guild_id.edit_member(ctx, user_id, edit).await {
        Ok(_) => {
            info!(
                "Timed out user {} in guild {} for {:?} ({})",
                user_id, guild_id, duration, reason
            );
            Ok(())
        }
        Err(e) => {
            error!("Failed to time out user {}: {:?}", user_id, e);
            Err(Error::Serenity(e))
        }
    }
}
