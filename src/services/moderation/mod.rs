pub mod ban_service;
pub mod decision;
pub mod mod_log;
pub mod timeout_service;
pub mod warn_service;
