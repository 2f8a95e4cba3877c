use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Warning {
    pub id: Uuid,
    pub guild_id: i64,
    pub user_id: i64,
    pub moderator_id: i64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl Warning {
    /// Whether the warning was issued by the bot itself
    pub fn is_automatic(&self, bot_id: u64) -> bool {
        self.moderator_id as u64 == bot_id
    }
}
