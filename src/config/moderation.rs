use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::thresholds::*;
use crate::services::rate::{ActionKind, RateWindows};
use crate::utils::profanity::default_blocklist;

/// Static moderation configuration, built once at startup and handed to the
/// rate tracker and policy engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// Trailing window for ban/kick/channel/role deletions
    pub antinuke_window_ms: u64,
    pub ban_threshold: u32,
    pub kick_threshold: u32,
    pub channel_delete_threshold: u32,
    pub role_delete_threshold: u32,

    pub spam_threshold: u32,
    pub spam_interval_ms: u64,

    pub max_mentions: usize,
    pub caps_percent: u32,
    pub caps_min_length: usize,
    pub repeat_run: usize,
    pub max_emojis: usize,

    pub mute_threshold: i64,
    pub mute_duration_seconds: u64,
    pub notice_seconds: u64,
    pub audit_lookback_ms: u64,

    /// Lowercase blocklist for the profanity rule
    pub blocked_words: Vec<String>,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            antinuke_window_ms: DEFAULT_ANTINUKE_WINDOW_MS,
            ban_threshold: DEFAULT_BAN_THRESHOLD,
            kick_threshold: DEFAULT_KICK_THRESHOLD,
            channel_delete_threshold: DEFAULT_CHANNEL_DELETE_THRESHOLD,
            role_delete_threshold: DEFAULT_ROLE_DELETE_THRESHOLD,
            spam_threshold: DEFAULT_SPAM_THRESHOLD,
            spam_interval_ms: DEFAULT_SPAM_INTERVAL_MS,
            max_mentions: DEFAULT_MAX_MENTIONS,
            caps_percent: DEFAULT_CAPS_PERCENT,
            caps_min_length: DEFAULT_CAPS_MIN_LENGTH,
            repeat_run: DEFAULT_REPEAT_RUN,
            max_emojis: DEFAULT_MAX_EMOJIS,
            mute_threshold: DEFAULT_MUTE_THRESHOLD,
            mute_duration_seconds: DEFAULT_MUTE_DURATION_SECONDS,
            notice_seconds: DEFAULT_NOTICE_SECONDS,
            audit_lookback_ms: DEFAULT_AUDIT_LOOKBACK_MS,
            blocked_words: default_blocklist(),
        }
    }
}

impl ModerationConfig {
    /// Load a full config from a JSON file. Missing fields fall back to defaults.
    pub fn from_file(path: &str) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read moderation config {}: {}", path, e))?;
        Self::from_json(&raw).map_err(|e| format!("Invalid moderation config {}: {}", path, e))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.blocked_words = config
            .blocked_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Ok(config)
    }

    /// Override individual values from environment variables
    pub fn apply_env_overrides(&mut self) {
        override_from_env("ANTINUKE_WINDOW_MS", &mut self.antinuke_window_ms);
        override_from_env("BAN_THRESHOLD", &mut self.ban_threshold);
        override_from_env("KICK_THRESHOLD", &mut self.kick_threshold);
        override_from_env("CHANNEL_DELETE_THRESHOLD", &mut self.channel_delete_threshold);
        override_from_env("ROLE_DELETE_THRESHOLD", &mut self.role_delete_threshold);
        override_from_env("SPAM_THRESHOLD", &mut self.spam_threshold);
        override_from_env("SPAM_INTERVAL_MS", &mut self.spam_interval_ms);
        override_from_env("MAX_MENTIONS", &mut self.max_mentions);
        override_from_env("CAPS_PERCENT", &mut self.caps_percent);
        override_from_env("CAPS_MIN_LENGTH", &mut self.caps_min_length);
        override_from_env("MAX_EMOJIS", &mut self.max_emojis);
        override_from_env("MUTE_THRESHOLD", &mut self.mute_threshold);
        override_from_env("MUTE_DURATION_SECONDS", &mut self.mute_duration_seconds);
    }

    /// Occurrences allowed per window before an action kind counts as a violation
    pub fn threshold(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::Ban => self.ban_threshold,
            ActionKind::Kick => self.kick_threshold,
            ActionKind::ChannelDelete => self.channel_delete_threshold,
            ActionKind::RoleDelete => self.role_delete_threshold,
            ActionKind::MessageSpam => self.spam_threshold,
        }
    }

    pub fn windows(&self) -> RateWindows {
        RateWindows {
            antinuke_ms: self.antinuke_window_ms,
            spam_ms: self.spam_interval_ms,
        }
    }

    pub fn mute_duration(&self) -> Duration {
        Duration::from_secs(self.mute_duration_seconds)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }
}

fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(raw) = env::var(key) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => warn!("Ignoring invalid value for {}: {:?}", key, raw),
        }
    }
}
