use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Warning;

pub async fn create(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    reason: &str,
) -> Result<Warning, sqlx::Error> {
    sqlx::query_as::<_, Warning>(
        r#"
        INSERT INTO warnings (id, guild_id, user_id, moderator_id, reason)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#
    )
    .bind(Uuid::new_v4())
    .bind(guild_id)
    .bind(user_id)
    .bind(moderator_id)
    .bind(reason)
    .fetch_one(pool)
    .await
}

/// Total warnings for a user, manual and automatic
pub async fn count_for_user(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM warnings WHERE guild_id = $1 AND user_id = $2"
    )
    .bind(guild_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

pub async fn list_for_user(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
    limit: i64,
) -> Result<Vec<Warning>, sqlx::Error> {
    sqlx::query_as::<_, Warning>(
        r#"
        SELECT * FROM warnings
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

/// Remove every warning for a user. Returns how many were deleted.
pub async fn clear_for_user(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM warnings WHERE guild_id = $1 AND user_id = $2"
    )
    .bind(guild_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
