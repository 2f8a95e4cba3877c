use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{ModAction, ModLogEntry};

pub async fn create(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    action: ModAction,
    reason: &str,
) -> Result<ModLogEntry, sqlx::Error> {
    sqlx::query_as::<_, ModLogEntry>(
        r#"
        INSERT INTO mod_logs (id, guild_id, user_id, moderator_id, action, reason)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#
    )
    .bind(Uuid::new_v4())
    .bind(guild_id)
    .bind(user_id)
    .bind(moderator_id)
    .bind(action.as_str())
    .bind(reason)
    .fetch_one(pool)
    .await
}

pub async fn list_recent(
    pool: &PgPool,
    guild_id: i64,
    limit: i64,
) -> Result<Vec<ModLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, ModLogEntry>(
        r#"
        SELECT * FROM mod_logs
        WHERE guild_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#
    )
    .bind(guild_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_for_user(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ModLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, ModLogEntry>(
        r#"
        SELECT * FROM mod_logs
        WHERE guild_id = $1 AND user_id = $2
        ORDER BY created_at DESC
        LIMIT $3
        "#
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
