use std::sync::Arc;

use serenity::all::{Context, GuildId, UserId};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::thresholds::format_duration;
use crate::db::models::ModAction;
use crate::db::queries::warning;
use crate::services::moderation::{mod_log, timeout_service};

/// Result of recording one warning
#[derive(Debug, Clone)]
pub struct WarnOutcome {
    /// Warnings on record for the user, including this one
    pub total: i64,
    /// A timeout was applied because the total reached the mute threshold
    pub escalated: bool,
}

/// Where warnings are stored and counted
pub(crate) trait WarningLedger {
    async fn insert(
        &self,
        guild_id: i64,
        user_id: i64,
        moderator_id: i64,
        reason: &str,
    ) -> Result<(), sqlx::Error>;

    async fn count(&self, guild_id: i64, user_id: i64) -> Result<i64, sqlx::Error>;
}

impl WarningLedger for PgPool {
    async fn insert(
        &self,
        guild_id: i64,
        user_id: i64,
        moderator_id: i64,
        reason: &str,
    ) -> Result<(), sqlx::Error> {
        warning::create(self, guild_id, user_id, moderator_id, reason)
            .await
            .map(|_| ())
    }

    async fn count(&self, guild_id: i64, user_id: i64) -> Result<i64, sqlx::Error> {
        warning::count_for_user(self, guild_id, user_id).await
    }
}

/// Store a warning, then return the user's total including it
pub(crate) async fn record_and_count<L: WarningLedger>(
    ledger: &L,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    reason: &str,
) -> Result<i64, sqlx::Error> {
    ledger.insert(guild_id, user_id, moderator_id, reason).await?;
    ledger.count(guild_id, user_id).await
}

/// Whether a warning total calls for a timeout
pub fn should_escalate(total: i64, threshold: i64) -> bool {
    threshold > 0 && total >= threshold
}

/// Record a warning and time the user out once they reach the mute threshold.
/// Used by both the `/warn` command and automod.
pub async fn issue_warning(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    moderator_id: UserId,
    reason: &str,
) -> Result<WarnOutcome, Error> {
    let total = record_and_count(
        &data.pool,
        guild_id.get() as i64,
        user_id.get() as i64,
        moderator_id.get() as i64,
        reason,
    )
    .await?;

    mod_log::record(ctx, data, guild_id, user_id, moderator_id, ModAction::Warn, reason).await;

    let escalated = if should_escalate(total, data.moderation().mute_threshold) {
        escalate(ctx, data, guild_id, user_id, total).await
    } else {
        false
    };

    Ok(WarnOutcome {
        total,
        escalated,
    })
}

async fn escalate(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    total: i64,
) -> bool {
    let duration = data.moderation().mute_duration();
    let reason = format!("Reached {} warnings", total);

    match timeout_service::apply_timeout(ctx, guild_id, user_id, duration, &reason).await {
        Ok(()) => {
            info!(
                "Escalated user {} in guild {} to a timeout after {} warnings",
                user_id, guild_id, total
            );
            let bot_id = ctx.cache.current_user().id;
            let log_reason = format!("{} ({})", reason, format_duration(duration));
            mod_log::record(ctx, data, guild_id, user_id, bot_id, ModAction::Timeout, &log_reason)
                .await;
            true
        }
        Err(e) => {
            warn!("Could not escalate user {} in guild {}: {}", user_id, guild_id, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_escalation_threshold() {
        // One below the threshold stays a plain warning
        assert!(!should_escalate(2, 3));
        // The warning that reaches the threshold escalates, and so do later ones
        assert!(should_escalate(3, 3));
        assert!(should_escalate(4, 3));
    }

    #[test]
    fn test_zero_threshold_disables_escalation() {
        assert!(!should_escalate(10, 0));
    }

    /// (guild, user) per stored warning
    #[derive(Default)]
    struct MemoryLedger {
        rows: Mutex<Vec<(i64, i64)>>,
    }

    impl WarningLedger for MemoryLedger {
        async fn insert(
            &self,
            guild_id: i64,
            user_id: i64,
            _moderator_id: i64,
            _reason: &str,
        ) -> Result<(), sqlx::Error> {
            self.rows.lock().unwrap().push((guild_id, user_id));
            Ok(())
        }

        async fn count(&self, guild_id: i64, user_id: i64) -> Result<i64, sqlx::Error> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|r| **r == (guild_id, user_id)).count() as i64)
        }
    }

    #[test]
    fn test_warning_that_reaches_threshold_escalates() {
        let ledger = MemoryLedger::default();
        let threshold = 3;

        tokio_test::block_on(async {
            for expected in 1..threshold {
                let total = record_and_count(&ledger, 1, 2, 99, "spam").await.unwrap();
                assert_eq!(total, expected);
                assert!(!should_escalate(total, threshold));
            }

            // The count includes the warning just stored
            let total = record_and_count(&ledger, 1, 2, 99, "spam").await.unwrap();
            assert_eq!(total, threshold);
            assert!(should_escalate(total, threshold));

            // Someone else's first warning is unaffected
            let other = record_and_count(&ledger, 1, 3, 99, "caps").await.unwrap();
            assert_eq!(other, 1);
            assert!(!should_escalate(other, threshold));
        });
    }
}
