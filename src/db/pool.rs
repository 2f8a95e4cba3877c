use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{debug, info};

const MAX_CONNECTIONS: u32 = 5;

/// Embedded schema, applied in order on every start
const MIGRATIONS: &[(&str, &str)] = &[
    ("guild_configs", include_str!("../../migrations/001_guild_configs.sql")),
    ("warnings", include_str!("../../migrations/002_warnings.sql")),
    ("mod_logs", include_str!("../../migrations/003_mod_logs.sql")),
];

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;

    info!("Database connection established");

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Running {} database migrations...", MIGRATIONS.len());

    for (name, migration) in MIGRATIONS {
        debug!("Applying migration {}", name);

        for statement in statements(migration) {
            if let Err(e) = sqlx::query(statement).execute(pool).await {
                // Statements use IF NOT EXISTS, but tolerate races with another instance
                if !is_already_applied(&e) {
                    return Err(e);
                }
            }
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

/// Split a migration file into individual statements
fn statements(migration: &str) -> impl Iterator<Item = &str> {
    migration
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn is_already_applied(error: &sqlx::Error) -> bool {
    let message = error.to_string();
    message.contains("already exists") || message.contains("duplicate key")
}
