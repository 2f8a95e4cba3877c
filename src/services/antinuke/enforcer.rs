use std::sync::Arc;

use serenity::all::{Context, GuildId, UserId};
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::db::models::ModAction;
use crate::services::antinuke::policy::Verdict;
use crate::services::moderation::{ban_service, mod_log};
use crate::utils::permissions;

/// Apply the remediation for an anti-nuke violation. Every step is
/// best-effort: failures are logged and the remaining steps still run.
pub async fn enforce(ctx: &Context, data: &Arc<Data>, guild_id: GuildId, verdict: Verdict) {
    let Verdict::Violation {
        decision,
        actor_id,
        count,
        threshold,
        revert_ban_of,
    } = verdict
    else {
        return;
    };

    let actor = UserId::new(actor_id);
    let bot_id = ctx.cache.current_user().id;
    let reason = format!(
        "Anti-nuke: {} ({} actions, limit {})",
        decision.reason, count, threshold
    );

    warn!(
        "Anti-nuke triggered in guild {}: user {} hit {} ({}/{})",
        guild_id, actor, decision.reason, count, threshold
    );

    let banned = if permissions::bot_can_punish(ctx, guild_id, actor).await {
        match ban_service::ban_member(ctx, guild_id, actor, &reason).await {
            Ok(()) => {
                mod_log::record(ctx, data, guild_id, actor, bot_id, ModAction::Ban, &reason).await;
                true
            }
            Err(e) => {
                warn!("Failed to ban anti-nuke violator {} in guild {}: {}", actor, guild_id, e);
                false
            }
        }
    } else {
        warn!(
            "Cannot ban anti-nuke violator {} in guild {}: role hierarchy does not allow it",
            actor, guild_id
        );
        false
    };

    if let Some(victim_id) = revert_ban_of {
        let victim = UserId::new(victim_id);
        match ban_service::unban_member(ctx, guild_id, victim).await {
            Ok(()) => {
                info!("Reverted ban of {} by anti-nuke violator {}", victim, actor);
                let unban_reason = format!("Reverted ban issued by <@{}>", actor);
                mod_log::record(ctx, data, guild_id, victim, bot_id, ModAction::Unban, &unban_reason)
                    .await;
            }
            Err(e) if banned => {
                // Violator is gone but the victim stays banned; needs a human
                error!(
                    "Banned violator {} but could not revert their ban of {} in guild {}: {}",
                    actor, victim, guild_id, e
                );
            }
            Err(e) => {
                warn!("Failed to revert ban of {} in guild {}: {}", victim, guild_id, e);
            }
        }
    }
}
