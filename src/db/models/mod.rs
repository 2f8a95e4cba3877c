mod guild_config;
mod mod_log;
mod warning;

pub use guild_config::{GuildConfig, Protection};
pub use mod_log::{ModAction, ModLogEntry};
pub use warning::Warning;
