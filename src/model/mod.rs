//! Data transfer objects returned by the HTTP API.

pub mod api;
pub mod branch;
pub mod dashboard;
pub mod staff;
pub mod transaction;
pub mod user;
pub mod work_log;
