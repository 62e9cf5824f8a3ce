//! HTTP controller endpoints for the branchdesk web API.
//!
//! Axum handlers for login, the dashboard and the CRUD, print and export screens of branches,
//! staff, work logs and transactions. Every handler resolves the request identity from the
//! session, checks the permission it needs, calls a service and returns JSON, HTML or a file.

pub mod auth;
pub mod branch;
pub mod dashboard;
pub mod staff;
pub mod transaction;
pub mod util;
pub mod work_log;
