//! Session data models.
//!
//! Typed wrappers for values kept in the tower-sessions store (Valkey in production, memory in
//! tests): the logged in user ID and pending flash messages.

pub mod flash;
pub mod user;
