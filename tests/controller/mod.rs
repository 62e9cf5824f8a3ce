//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with an in-memory session and SQLite database, covering
//! permission checks, redirects, flash messages and response bodies.

mod auth;
mod branch;
mod dashboard;
mod staff;
mod transaction;
mod work_log;
