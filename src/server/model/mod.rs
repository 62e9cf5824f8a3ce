//! Server-side models: application state, database model aliases, the request identity and
//! typed session values.

pub mod app;
pub mod db;
pub mod identity;
pub mod session;
