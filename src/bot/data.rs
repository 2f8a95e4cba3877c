use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{ModerationConfig, Settings};
use crate::services::rate::{Clock, RateTracker, SystemClock};

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: PgPool,
    pub settings: Settings,
    /// Sliding-window counters for anti-nuke and message spam
    pub tracker: Arc<RateTracker>,
    /// Time source shared with the tracker
    pub clock: Arc<dyn Clock>,
}

impl Data {
    pub fn new(pool: PgPool, settings: Settings) -> Self {
        Self::with_clock(pool, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: PgPool, settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let tracker = Arc::new(RateTracker::new(
            settings.moderation.windows(),
            clock.clone(),
        ));
        Self {
            pool,
            settings,
            tracker,
            clock,
        }
    }

    pub fn moderation(&self) -> &ModerationConfig {
        &self.settings.moderation
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("tracked_keys", &self.tracker.key_count())
            .field("guild_id", &self.settings.guild_id)
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
