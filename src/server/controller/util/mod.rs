//! Helpers shared by the controllers: resolving the session user and checking permissions.

pub mod identity;
