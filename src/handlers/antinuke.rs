use std::sync::Arc;
use std::time::Duration;

use serenity::all::{Context, GuildId};
use tokio::time::sleep;
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::models::Protection;
use crate::db::queries::guild_config;
use crate::handlers::protection_enabled;
use crate::services::antinuke::{self, audit, enforcer, AdminAction, Verdict};
use crate::services::rate::ActionKind;

/// Audit log entries can land slightly after the gateway event
const AUDIT_LOG_DELAY: Duration = Duration::from_millis(500);

/// Feed a ban, kick, channel deletion or role deletion into anti-nuke
pub async fn handle_admin_action(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    kind: ActionKind,
    target_id: u64,
) -> Result<(), Error> {
    let lookup = guild_config::get(&data.pool, guild_id.get() as i64).await;
    if !protection_enabled(lookup, guild_id, Protection::Antinuke) {
        return Ok(());
    }

    sleep(AUDIT_LOG_DELAY).await;

    let actor = audit::resolve_actor(
        ctx,
        guild_id,
        kind,
        target_id,
        data.clock.now_ms(),
        data.moderation().audit_lookback_ms,
    )
    .await;

    let action = AdminAction {
        guild_id: guild_id.get(),
        kind,
        actor_id: actor.map(|id| id.get()),
        target_id: Some(target_id),
    };

    let bot_id = ctx.cache.current_user().id.get();
    let verdict = antinuke::assess(&data.tracker, data.moderation(), &action, bot_id);

    match verdict {
        Verdict::Violation { .. } => enforcer::enforce(ctx, data, guild_id, verdict).await,
        Verdict::WithinLimit { count, threshold } => {
            debug!(
                "{} by {:?} in guild {}: {}/{}",
                kind, actor, guild_id, count, threshold
            );
        }
        Verdict::SelfAction | Verdict::Unattributed => {
            debug!("{} in guild {} not counted ({:?})", kind, guild_id, verdict);
        }
    }

    Ok(())
}
