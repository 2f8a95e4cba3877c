use std::env;

use crate::config::moderation::ModerationConfig;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// Register commands in this guild only (development)
    pub guild_id: Option<u64>,
    /// Thresholds and word lists for anti-nuke and automod
    pub moderation: ModerationConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set")?;

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let mut moderation = match env::var("MODERATION_CONFIG").ok().filter(|s| !s.is_empty()) {
            Some(path) => ModerationConfig::from_file(&path)?,
            None => ModerationConfig::default(),
        };
        moderation.apply_env_overrides();

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            moderation,
        })
    }
}
