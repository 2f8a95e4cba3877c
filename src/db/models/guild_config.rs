use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GuildConfig {
    pub guild_id: i64,
    pub mod_log_channel_id: Option<i64>,
    pub automod_enabled: bool,
    pub antinuke_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-guild protections that can be switched off with `/setup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    Automod,
    Antinuke,
}

impl GuildConfig {
    pub fn is_enabled(&self, protection: Protection) -> bool {
        match protection {
            Protection::Automod => self.automod_enabled,
            Protection::Antinuke => self.antinuke_enabled,
        }
    }

    /// Mod log channel, if one was set up
    pub fn mod_log_channel(&self) -> Option<u64> {
        self.mod_log_channel_id.map(|id| id as u64)
    }
}
