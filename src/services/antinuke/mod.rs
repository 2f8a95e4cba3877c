pub mod audit;
pub mod enforcer;
pub mod policy;

pub use policy::{assess, AdminAction, Verdict};
