use std::time::Duration;

/// Anti-nuke: trailing window shared by all destructive actions (1 minute)
pub const DEFAULT_ANTINUKE_WINDOW_MS: u64 = 60_000;

/// Anti-nuke: destructive actions per window before the actor is punished
pub const DEFAULT_BAN_THRESHOLD: u32 = 3;
pub const DEFAULT_KICK_THRESHOLD: u32 = 3;
pub const DEFAULT_CHANNEL_DELETE_THRESHOLD: u32 = 2;
pub const DEFAULT_ROLE_DELETE_THRESHOLD: u32 = 2;

/// Message spam: messages per interval before the author is flagged
pub const DEFAULT_SPAM_THRESHOLD: u32 = 5;
pub const DEFAULT_SPAM_INTERVAL_MS: u64 = 5_000;

/// Content rules
pub const DEFAULT_MAX_MENTIONS: usize = 5;
pub const DEFAULT_CAPS_PERCENT: u32 = 70;
pub const DEFAULT_CAPS_MIN_LENGTH: usize = 10;
pub const DEFAULT_REPEAT_RUN: usize = 6;
pub const DEFAULT_MAX_EMOJIS: usize = 10;

/// Warnings needed before the author is timed out
pub const DEFAULT_MUTE_THRESHOLD: i64 = 3;
pub const DEFAULT_MUTE_DURATION_SECONDS: u64 = 10 * 60;

/// How long the automod notice stays in the channel
pub const DEFAULT_NOTICE_SECONDS: u64 = 5;

/// Max age of an audit log entry for it to be attributed to a gateway event
pub const DEFAULT_AUDIT_LOOKBACK_MS: u64 = 10_000;

/// How often empty rate tracker keys are dropped
pub const TRACKER_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Format duration for display
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs < 60 {
        format!("{} seconds", total_secs)
    } else if total_secs < 3600 {
        let mins = total_secs / 60;
        format!("{} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else if total_secs < 86400 {
        let hours = total_secs / 3600;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = total_secs / 86400;
        format!("{} day{}", days, if days == 1 { "" } else { "s" })
    }
}
