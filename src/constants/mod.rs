pub mod embeds;
pub mod thresholds;
