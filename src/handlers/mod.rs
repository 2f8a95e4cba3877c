pub mod antinuke;
pub mod event_handler;
pub mod message;

use serenity::all::GuildId;
use tracing::warn;

use crate::db::models::{GuildConfig, Protection};

/// Whether a protection runs for a guild, given the result of its config lookup.
/// Guilds without a row and failed lookups keep the protection on.
pub fn protection_enabled(
    lookup: Result<Option<GuildConfig>, sqlx::Error>,
    guild_id: GuildId,
    protection: Protection,
) -> bool {
    match lookup {
        Ok(Some(config)) => config.is_enabled(protection),
        Ok(None) => true,
        Err(e) => {
            warn!(
                "Failed to load guild config for {} ({:?} stays on): {:?}",
                guild_id, protection, e
            );
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn config(automod: bool, antinuke: bool) -> GuildConfig {
        GuildConfig {
            guild_id: 1,
            mod_log_channel_id: None,
            automod_enabled: automod,
            antinuke_enabled: antinuke,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_database_error_keeps_protections_on() {
        let guild = GuildId::new(1);
        assert!(protection_enabled(Err(sqlx::Error::PoolTimedOut), guild, Protection::Antinuke));
        assert!(protection_enabled(Err(sqlx::Error::PoolClosed), guild, Protection::Automod));
    }

    #[test]
    fn test_missing_config_defaults_on() {
        assert!(protection_enabled(Ok(None), GuildId::new(1), Protection::Antinuke));
    }

    #[test]
    fn test_toggles_are_independent() {
        let guild = GuildId::new(1);
        assert!(!protection_enabled(Ok(Some(config(true, false))), guild, Protection::Antinuke));
        assert!(protection_enabled(Ok(Some(config(true, false))), guild, Protection::Automod));
        assert!(!protection_enabled(Ok(Some(config(false, true))), guild, Protection::Automod));
    }
}
