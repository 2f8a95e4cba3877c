use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{debug, error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::handlers::{antinuke, message};
use crate::services::rate::ActionKind;
use crate::utils::formatting::truncate;

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::Message { new_message } => {
            if let Err(e) = message::handle_message(ctx, data, new_message).await {
                error!(
                    "Automod error in guild {:?} for user {} (content: {:?}): {:?}",
                    new_message.guild_id,
                    new_message.author.id,
                    truncate(&new_message.content, 200),
                    e
                );
            }
        }

        FullEvent::GuildBanAddition {
            guild_id,
            banned_user,
        } => {
            let target = banned_user.id.get();
            if let Err(e) =
                antinuke::handle_admin_action(ctx, data, *guild_id, ActionKind::Ban, target).await
            {
                error!("Anti-nuke ban handler error in guild {}: {:?}", guild_id, e);
            }
        }

        FullEvent::GuildMemberRemoval { guild_id, user, .. } => {
            // Only removals with a matching kick audit entry count
            let target = user.id.get();
            if let Err(e) =
                antinuke::handle_admin_action(ctx, data, *guild_id, ActionKind::Kick, target).await
            {
                error!("Anti-nuke kick handler error in guild {}: {:?}", guild_id, e);
            }
        }

        FullEvent::ChannelDelete { channel, .. } => {
            let target = channel.id.get();
            if let Err(e) = antinuke::handle_admin_action(
                ctx,
                data,
                channel.guild_id,
                ActionKind::ChannelDelete,
                target,
            )
            .await
            {
                error!(
                    "Anti-nuke channel handler error in guild {}: {:?}",
                    channel.guild_id, e
                );
            }
        }

        FullEvent::GuildRoleDelete {
            guild_id,
            removed_role_id,
            ..
        } => {
            let target = removed_role_id.get();
            if let Err(e) =
                antinuke::handle_admin_action(ctx, data, *guild_id, ActionKind::RoleDelete, target)
                    .await
            {
                error!("Anti-nuke role handler error in guild {}: {:?}", guild_id, e);
            }
        }

        FullEvent::GuildDelete { incomplete, .. } => {
            debug!("Guild {} removed", incomplete.id);
        }

        _ => {}
    }

    Ok(())
}
