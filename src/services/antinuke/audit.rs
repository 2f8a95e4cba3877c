use serenity::all::{Context, GuildId, UserId};
use serenity::model::guild::audit_log::{Action, ChannelAction, MemberAction, RoleAction};
use tracing::{debug, warn};

use crate::services::rate::ActionKind;

/// Discord epoch (2015-01-01T00:00:00Z) in Unix milliseconds
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Audit log action type matching a tracked action kind
pub fn audit_action(kind: ActionKind) -> Option<Action> {
    match kind {
        ActionKind::Ban => Some(Action::Member(MemberAction::BanAdd)),
        ActionKind::Kick => Some(Action::Member(MemberAction::Kick)),
        ActionKind::ChannelDelete => Some(Action::Channel(ChannelAction::Delete)),
        ActionKind::RoleDelete => Some(Action::Role(RoleAction::Delete)),
        ActionKind::MessageSpam => None,
    }
}

/// Creation time of a snowflake in Unix milliseconds
pub fn snowflake_ms(id: u64) -> u64 {
    (id >> 22) + DISCORD_EPOCH_MS
}

/// Entry is no older than `lookback_ms`. Entries slightly in the future
/// (clock skew) still count.
pub fn is_recent(entry_ms: u64, now_ms: u64, lookback_ms: u64) -> bool {
    now_ms.saturating_sub(entry_ms) <= lookback_ms
}

/// Audit entries fetched per lookup. A flood keeps adding entries between the
/// gateway event and the fetch, so the one we want is rarely the newest.
const AUDIT_PAGE_SIZE: u8 = 25;

/// The parts of an audit log entry attribution looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditCandidate {
    pub entry_id: u64,
    pub target_id: Option<u64>,
    pub user_id: u64,
}

/// Pick the newest entry that targets `target_id` and is no older than
/// `lookback_ms`
pub fn select_entry(
    entries: &[AuditCandidate],
    target_id: u64,
    now_ms: u64,
    lookback_ms: u64,
) -> Option<AuditCandidate> {
    entries
        .iter()
        .filter(|e| e.target_id == Some(target_id))
        .filter(|e| is_recent(snowflake_ms(e.entry_id), now_ms, lookback_ms))
        .max_by_key(|e| e.entry_id)
        .copied()
}

/// Find who performed `kind` on `target_id` by scanning the most recent audit
/// log entries of that action type. Any failure means the event can't be
/// attributed.
pub async fn resolve_actor(
    ctx: &Context,
    guild_id: GuildId,
    kind: ActionKind,
    target_id: u64,
    now_ms: u64,
    lookback_ms: u64,
) -> Option<UserId> {
    let action = audit_action(kind)?;

    let logs = match guild_id
        .audit_logs(&ctx.http, Some(action), None, None, Some(AUDIT_PAGE_SIZE))
        .await
    {
        Ok(logs) => logs,
        Err(e) => {
            warn!("Failed to fetch audit log for guild {}: {:?}", guild_id, e);
            return None;
        }
    };

    let candidates: Vec<AuditCandidate> = logs
        .entries
        .iter()
        .map(|entry| AuditCandidate {
            entry_id: entry.id.get(),
            target_id: entry.target_id.map(|id| id.get()),
            user_id: entry.user_id.get(),
        })
        .collect();

    match select_entry(&candidates, target_id, now_ms, lookback_ms) {
        Some(entry) => Some(UserId::new(entry.user_id)),
        None => {
            debug!(
                "No recent {} audit entry for target {} in guild {} ({} scanned)",
                kind,
                target_id,
                guild_id,
                candidates.len()
            );
            None
        }
    }
}
