pub mod moderation;
pub mod settings;

pub use moderation::ModerationConfig;
pub use settings::Settings;
