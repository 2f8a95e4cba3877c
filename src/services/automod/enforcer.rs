use std::sync::Arc;

use serenity::all::{Context, CreateMessage, GuildId, Message};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::bot::data::Data;
use crate::db::models::ModAction;
use crate::services::moderation::decision::ModerationDecision;
use crate::services::moderation::{mod_log, warn_service};

/// Remediate a message that broke a content rule.
///
/// Delete, notice and warning are attempted independently: a failed delete
/// still records the warning and the other way round. The delete is only
/// logged when it went through.
pub async fn enforce(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    msg: &Message,
    decision: ModerationDecision,
) {
    if !decision.violating {
        return;
    }

    let reason = decision.reason.as_str();
    let bot_id = ctx.cache.current_user().id;

    info!(
        "Automod: {} by user {} in guild {} ({:?})",
        reason, msg.author.id, guild_id, decision.severity
    );

    let deleted = msg.delete(ctx).await;
    if let Err(e) = &deleted {
        warn!("Failed to delete message {} ({}): {:?}", msg.id, reason, e);
    }
    if let Some(action) = deletion_log_action(&deleted) {
        mod_log::record(ctx, data, guild_id, msg.author.id, bot_id, action, reason).await;
    }

    post_notice(ctx, data, msg, decision).await;

    if let Err(e) =
        warn_service::issue_warning(ctx, data, guild_id, msg.author.id, bot_id, reason).await
    {
        warn!(
            "Failed to record automod warning for user {} in guild {}: {}",
            msg.author.id, guild_id, e
        );
    }
}

/// Tell the author why their message vanished, then remove the notice
async fn post_notice(ctx: &Context, data: &Arc<Data>, msg: &Message, decision: ModerationDecision) {
    let content = format!("<@{}>, {}.", msg.author.id, decision.reason.notice());

    let notice = match msg
        .channel_id
        .send_message(ctx, CreateMessage::new().content(content))
        .await
    {
        Ok(notice) => notice,
        Err(e) => {
            warn!("Failed to post automod notice in {}: {:?}", msg.channel_id, e);
            return;
        }
    };

    let http = ctx.http.clone();
    let linger = data.moderation().notice_duration();
    tokio::spawn(async move {
        sleep(linger).await;
        if let Err(e) = notice.channel_id.delete_message(&http, notice.id).await {
            debug!("Could not remove automod notice {}: {:?}", notice.id, e);
        }
    });
}

/// Mod-log entry for the delete step; nothing when the message is still there
fn deletion_log_action(deleted: &Result<(), serenity::Error>) -> Option<ModAction> {
    deleted.as_ref().ok().map(|_| ModAction::MessageDelete)
}
