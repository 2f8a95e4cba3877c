pub mod antinuke;
pub mod automod;
pub mod moderation;
pub mod rate;
