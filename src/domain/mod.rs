//! Domain aggregates exposed by the lead tracking service layer.

pub mod auth;
pub mod call_log;
pub mod client;
pub mod lead;
pub mod meet_log;
pub mod statistics;
pub mod types;
pub mod user;
