use sqlx::PgPool;

use crate::db::models::GuildConfig;

pub async fn get_or_create(pool: &PgPool, guild_id: i64) -> Result<GuildConfig, sqlx::Error> {
    sqlx::query_as::<_, GuildConfig>(
        r#"
        INSERT INTO guild_configs (guild_id)
        VALUES ($1)
        ON CONFLICT (guild_id) DO UPDATE SET guild_id = EXCLUDED.guild_id
        RETURNING *
        "#
    )
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn get(pool: &PgPool, guild_id: i64) -> Result<Option<GuildConfig>, sqlx::Error> {
    sqlx::query_as::<_, GuildConfig>(
        "SELECT * FROM guild_configs WHERE guild_id = $1"
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_mod_log_channel(
    pool: &PgPool,
    guild_id: i64,
    channel_id: Option<i64>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET mod_log_channel_id = $2, updated_at = NOW()
        WHERE guild_id = $1
        RETURNING *
        "#
    )
    .bind(guild_id)
    .bind(channel_id)
    .fetch_one(pool)
    .await
}

pub async fn set_automod_enabled(
    pool: &PgPool,
    guild_id: i64,
    enabled: bool,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET automod_enabled = $2, updated_at = NOW()
        WHERE guild_id = $1
        RETURNING *
        "#
    )
    .bind(guild_id)
    .bind(enabled)
    .fetch_one(pool)
    .await
}

pub async fn set_antinuke_enabled(
    pool: &PgPool,
    guild_id: i64,
    enabled: bool,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET antinuke_enabled = $2, updated_at = NOW()
        WHERE guild_id = $1
        RETURNING *
        "#
    )
    .bind(guild_id)
    .bind(enabled)
    .fetch_one(pool)
    .await
}
