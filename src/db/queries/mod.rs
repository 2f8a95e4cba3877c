pub mod guild_config;
pub mod mod_log;
pub mod warning;
