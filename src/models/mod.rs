//! Database models shared across the lead tracking repository.

pub mod call_log;
pub mod client;
pub mod config;
pub mod lead;
pub mod meet_log;
pub mod user;
