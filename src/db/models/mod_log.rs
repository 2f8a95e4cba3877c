use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Remediation recorded in the moderation log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModAction {
    Warn,
    Timeout,
    MessageDelete,
    Ban,
    Unban,
    ClearWarnings,
}

impl ModAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModAction::Warn => "warn",
            ModAction::Timeout => "timeout",
            ModAction::MessageDelete => "message_delete",
            ModAction::Ban => "ban",
            ModAction::Unban => "unban",
            ModAction::ClearWarnings => "clear_warnings",
        }
    }
}

impl fmt::Display for ModAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ModLogEntry {
    pub id: Uuid,
    pub guild_id: i64,
    pub user_id: i64,
    pub moderator_id: i64,
    pub action: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
