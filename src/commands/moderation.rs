use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::thresholds::format_duration;
use crate::db::models::ModAction;
use crate::db::queries::{mod_log as mod_log_queries, warning};
use crate::services::moderation::{mod_log, warn_service};
use crate::utils::formatting::{relative_time, truncate};

/// How many entries the list commands show
const LIST_LIMIT: i64 = 10;

/// Warn a member. Reaching the warning limit times them out.
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "User to warn"] user: User,
    #[description = "Reason for the warning"]
    #[max_length = 500]
    reason: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    if user.bot || user.id == ctx.author().id {
        let embed = embeds::error_embed()
            .title("Can't Warn")
            .description("You can't warn bots or yourself.");
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    }

    ctx.defer_ephemeral().await?;

    let outcome = warn_service::issue_warning(
        ctx.serenity_context(),
        ctx.data(),
        guild_id,
        user.id,
        ctx.author().id,
        &reason,
    )
    .await?;

    let mut description = format!(
        "<@{}> has been warned.\n**Reason:** {}\nThey now have **{}** warning{}.",
        user.id,
        reason,
        outcome.total,
        if outcome.total == 1 { "" } else { "s" }
    );
    if outcome.escalated {
        description.push_str(&format!(
            "\n\nThey reached the warning limit and were timed out for {}.",
            format_duration(ctx.data().moderation().mute_duration())
        ));
    }

    let embed = embeds::success_embed().title("User Warned").description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Show a member's warnings
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "User to look up"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let total = warning::count_for_user(pool, guild_id.get() as i64, user.id.get() as i64).await?;
    let recent =
        warning::list_for_user(pool, guild_id.get() as i64, user.id.get() as i64, LIST_LIMIT)
            .await?;

    let embed = if recent.is_empty() {
        embeds::standard_embed()
            .title(format!("Warnings for {}", user.name))
            .description("No warnings on record.")
    } else {
        let bot_id = ctx.serenity_context().cache.current_user().id.get();
        let lines: Vec<String> = recent
            .iter()
            .map(|w| {
                let by = if w.is_automatic(bot_id) {
                    "automod".to_string()
                } else {
                    format!("<@{}>", w.moderator_id)
                };
                format!(
                    "{} by {} {}",
                    truncate(&w.reason, 100),
                    by,
                    relative_time(w.created_at)
                )
            })
            .collect();

        embeds::warning_embed()
            .title(format!("Warnings for {}", user.name))
            .description(format!(
                "**{}** total (mute at {})\n\n{}",
                total,
                ctx.data().moderation().mute_threshold,
                embeds::bullet_list(&lines)
            ))
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Remove all of a member's warnings
#[poise::command(
    slash_command,
    rename = "clearwarnings",
    guild_only,
    required_permissions = "ADMINISTRATOR"
)]
pub async fn clear_warnings(
    ctx: Context<'_>,
    #[description = "User whose warnings to clear"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let removed =
        warning::clear_for_user(&ctx.data().pool, guild_id.get() as i64, user.id.get() as i64)
            .await?;

    if removed > 0 {
        mod_log::record(
            ctx.serenity_context(),
            ctx.data(),
            guild_id,
            user.id,
            ctx.author().id,
            ModAction::ClearWarnings,
            &format!("Cleared {} warnings", removed),
        )
        .await;
    }

    let embed = embeds::success_embed()
        .title("Warnings Cleared")
        .description(format!("Removed **{}** warning(s) from <@{}>.", removed, user.id));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Show recent moderation actions
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn modlogs(
    ctx: Context<'_>,
    #[description = "Only show actions against this user"] user: Option<User>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;

    let entries = match &user {
        Some(user) => {
            mod_log_queries::list_for_user(
                pool,
                guild_id.get() as i64,
                user.id.get() as i64,
                LIST_LIMIT,
            )
            .await?
        }
        None => mod_log_queries::list_recent(pool, guild_id.get() as i64, LIST_LIMIT).await?,
    };

    let lines: Vec<String> = entries
        .iter()
        .map(|e| {
            format!(
                "`{}` <@{}> by <@{}>: {} {}",
                e.action,
                e.user_id,
                e.moderator_id,
                truncate(&e.reason, 80),
                relative_time(e.created_at)
            )
        })
        .collect();

    let embed = embeds::standard_embed()
        .title("Moderation Log")
        .description(if lines.is_empty() {
            "Nothing logged yet.".to_string()
        } else {
            embeds::bullet_list(&lines)
        });

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
