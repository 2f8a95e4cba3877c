use std::sync::Arc;

use serenity::all::{Context, Message};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::models::Protection;
use crate::db::queries::guild_config;
use crate::handlers::protection_enabled;
use crate::services::automod::{self, enforcer, MessageFacts, RuleEnv};
use crate::utils::permissions;

/// Run automod over a new guild message
pub async fn handle_message(ctx: &Context, data: &Arc<Data>, msg: &Message) -> Result<(), Error> {
    if msg.author.bot {
        return Ok(());
    }

    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };

    let lookup = guild_config::get(&data.pool, guild_id.get() as i64).await;
    if !protection_enabled(lookup, guild_id, Protection::Automod) {
        return Ok(());
    }

    let perms = permissions::member_permissions(ctx, guild_id, msg.author.id).await;
    if perms.administrator() {
        return Ok(());
    }

    let facts = MessageFacts {
        guild_id: guild_id.get(),
        author_id: msg.author.id.get(),
        content: &msg.content,
        user_mentions: msg.mentions.len(),
        role_mentions: msg.mention_roles.len(),
        is_admin: false,
        can_manage_messages: perms.manage_messages(),
    };

    let decision = automod::evaluate(
        &facts,
        &RuleEnv {
            tracker: &data.tracker,
            config: data.moderation(),
        },
    );

    if decision.violating {
        enforcer::enforce(ctx, data, guild_id, msg, decision).await;
    }

    Ok(())
}
