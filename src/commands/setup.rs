use poise::serenity_prelude::Channel;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::guild_config;

/// Configure moderation for this server
#[poise::command(
    slash_command,
    subcommands("modlog", "automod", "antinuke"),
    required_permissions = "ADMINISTRATOR",
    guild_only
)]
pub async fn setup(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/setup modlog`, `/setup automod`, `/setup antinuke`")
        .await?;
    Ok(())
}

/// Set or clear the channel that receives moderation logs
#[poise::command(slash_command, guild_only)]
pub async fn modlog(
    ctx: Context<'_>,
    #[description = "Log channel (leave empty to disable logging)"]
    #[channel_types("Text")]
    channel: Option<Channel>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let channel_id = channel.as_ref().map(|c| c.id());
    guild_config::set_mod_log_channel(
        &ctx.data().pool,
        guild_id.get() as i64,
        channel_id.map(|id| id.get() as i64),
    )
    .await?;

    let embed = match channel_id {
        Some(id) => embeds::success_embed()
            .title("Mod Log Set")
            .description(format!("Moderation actions will be logged to <#{}>", id)),
        None => embeds::success_embed()
            .title("Mod Log Disabled")
            .description("Moderation actions will no longer be posted to a channel."),
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Turn message auto-moderation on or off
#[poise::command(slash_command, guild_only)]
pub async fn automod(
    ctx: Context<'_>,
    #[description = "New state"] state: Toggle,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    guild_config::set_automod_enabled(&ctx.data().pool, guild_id.get() as i64, state.enabled())
        .await?;

    let embed = embeds::success_embed()
        .title("Automod Updated")
        .description(format!("Message auto-moderation is now **{}**.", state.label()));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Turn anti-nuke protection on or off
#[poise::command(slash_command, guild_only)]
pub async fn antinuke(
    ctx: Context<'_>,
    #[description = "New state"] state: Toggle,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    guild_config::set_antinuke_enabled(&ctx.data().pool, guild_id.get() as i64, state.enabled())
        .await?;

    let embed = embeds::success_embed()
        .title("Anti-Nuke Updated")
        .description(format!("Anti-nuke protection is now **{}**.", state.label()));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// On/off choice for commands
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(&self) -> bool {
        matches!(self, Toggle::On)
    }

    pub fn label(&self) -> &'static str {
        if self.enabled() {
            "enabled"
        } else {
            "disabled"
        }
    }
}
