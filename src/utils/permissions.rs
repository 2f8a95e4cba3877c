use std::collections::HashMap;

use serenity::all::{Context, GuildId, Member, Permissions, Role, RoleId, UserId};
use tracing::debug;

/// Resolved guild permissions of a member, empty if the member can't be fetched
#[allow(deprecated)]
pub async fn member_permissions(ctx: &Context, guild_id: GuildId, user_id: UserId) -> Permissions {
    match guild_id.member(ctx, user_id).await {
        Ok(member) => member.permissions(ctx).unwrap_or_else(|_| Permissions::empty()),
        Err(e) => {
            debug!("Could not fetch member {} in guild {}: {:?}", user_id, guild_id, e);
            Permissions::empty()
        }
    }
}

/// Whether the bot sits above the target in the role hierarchy and can ban,
/// kick or time them out
pub async fn bot_can_punish(ctx: &Context, guild_id: GuildId, target: UserId) -> bool {
    let bot_id = ctx.cache.current_user().id;

    let (Ok(target_member), Ok(bot_member)) = (
        guild_id.member(ctx, target).await,
        guild_id.member(ctx, bot_id).await,
    ) else {
        return false;
    };

    let target_is_owner = match guild_id.to_partial_guild(&ctx.http).await {
        Ok(guild) => guild.owner_id == target,
        Err(_) => return false,
    };

    let Ok(roles) = guild_id.roles(&ctx.http).await else {
        return false;
    };

    outranks(
        highest_role_position(&bot_member, &roles),
        highest_role_position(&target_member, &roles),
        target_is_owner,
    )
}

fn highest_role_position(member: &Member, roles: &HashMap<RoleId, Role>) -> u16 {
    member
        .roles
        .iter()
        .filter_map(|id| roles.get(id).map(|r| r.position))
        .max()
        .unwrap_or(0)
}

/// The guild owner can never be punished; everyone else only by a strictly
/// higher role
pub fn outranks(bot_position: u16, target_position: u16, target_is_owner: bool) -> bool {
    !target_is_owner && bot_position > target_position
}
