pub mod clock;
pub mod tracker;

use std::fmt;

pub use clock::{Clock, ManualClock, SystemClock};
pub use tracker::{spawn_sweeper, RateTracker};

/// Kinds of occurrences counted by the rate tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Ban,
    Kick,
    ChannelDelete,
    RoleDelete,
    MessageSpam,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Ban => "ban",
            ActionKind::Kick => "kick",
            ActionKind::ChannelDelete => "channelDelete",
            ActionKind::RoleDelete => "roleDelete",
            ActionKind::MessageSpam => "messageSpam",
        }
    }

    /// Destructive administrative actions watched by anti-nuke
    pub fn is_destructive(&self) -> bool {
        !matches!(self, ActionKind::MessageSpam)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite identity of one occurrence log: (guild, user, action)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateKey {
    pub scope: u64,
    pub subject: u64,
    pub kind: ActionKind,
}

impl RateKey {
    pub fn new(scope: u64, subject: u64, kind: ActionKind) -> Self {
        Self {
            scope,
            subject,
            kind,
        }
    }
}

/// Trailing window lengths in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindows {
    /// Shared by every destructive action kind
    pub antinuke_ms: u64,
    pub spam_ms: u64,
}

impl RateWindows {
    pub fn window_for(&self, kind: ActionKind) -> u64 {
        if kind.is_destructive() {
            self.antinuke_ms
        } else {
            self.spam_ms
        }
    }
}
