pub mod enforcer;
pub mod pipeline;
pub mod rules;

pub use pipeline::{evaluate, MessageFacts, RuleEnv};
