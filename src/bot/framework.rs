use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use sqlx::PgPool;
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::constants::thresholds::TRACKER_SWEEP_INTERVAL;
use crate::handlers::event_handler::event_handler;
use crate::services::rate::spawn_sweeper;

pub async fn run(settings: Settings, pool: PgPool) -> Result<(), Error> {
    let data = Arc::new(Data::new(pool, settings.clone()));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::setup::setup(),
                commands::automod::automod(),
                commands::moderation::warn(),
                commands::moderation::warnings(),
                commands::moderation::clear_warnings(),
                commands::moderation::modlogs(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None, // Slash commands only
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command /{} failed: {:?}", ctx.command().name, error);
                            let _ = ctx.say(format!("Error: {}", error)).await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
                        }
                        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
                            let _ = ctx
                                .send(
                                    poise::CreateReply::default()
                                        .content("You don't have permission to use this command.")
                                        .ephemeral(true),
                                )
                                .await;
                        }
                        poise::FrameworkError::UnknownCommand { .. } => {
                            // Mentions and prefix-style messages land here
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                spawn_sweeper(data.tracker.clone(), TRACKER_SWEEP_INTERVAL);
                info!("Started rate tracker sweeper");

                let commands = &framework.options().commands;
                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);
                        info!("Registering {} commands in guild {}", commands.len(), guild_id);

                        // Stale global copies would show up twice in the dev guild
                        match ctx.http.get_global_commands().await {
                            Ok(global_commands) => {
                                for cmd in &global_commands {
                                    if let Err(e) = ctx.http.delete_global_command(cmd.id).await {
                                        warn!("Failed to delete global command {}: {:?}", cmd.name, e);
                                    }
                                }
                            }
                            Err(e) => warn!("Could not list global commands: {:?}", e),
                        }

                        if let Err(e) =
                            poise::builtins::register_in_guild(ctx, commands, guild_id).await
                        {
                            error!("Failed to register guild commands in {}: {:?}", guild_id, e);
                            error!("Re-invite URL: https://discord.com/api/oauth2/authorize?client_id={}&permissions=0&scope=bot%20applications.commands", ready.user.id);
                            return Err(Error::Serenity(e));
                        }
                        info!("Registered guild commands");
                    }
                    None => {
                        if let Err(e) = poise::builtins::register_globally(ctx, commands).await {
                            error!("Failed to register commands globally: {:?}", e);
                            return Err(Error::Serenity(e));
                        }
                        info!(
                            "Registered {} commands globally (may take up to an hour to appear)",
                            commands.len()
                        );
                    }
                }

                Ok(data)
            })
        })
        .build();

    // GUILD_MODERATION carries ban events, MESSAGE_CONTENT the automod input
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MODERATION
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}
