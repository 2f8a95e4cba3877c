use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warden::{bot, config::Settings, db};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warden=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Warden moderation bot");

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    let m = &settings.moderation;
    info!(
        "Anti-nuke: ban {} / kick {} / channel {} / role {} per {} ms",
        m.ban_threshold,
        m.kick_threshold,
        m.channel_delete_threshold,
        m.role_delete_threshold,
        m.antinuke_window_ms
    );
    info!(
        "Automod: spam {} per {} ms, timeout after {} warnings",
        m.spam_threshold, m.spam_interval_ms, m.mute_threshold
    );

    let pool = match db::pool::create_pool(&settings.database_url).await {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::pool::run_migrations(&pool).await {
        error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    info!("Database ready");

    if let Err(e) = bot::framework::run(settings, pool).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}
