//! Database entities for branchdesk.

pub mod prelude;

pub mod auth_user;
pub mod auth_user_group;
pub mod branch;
pub mod staff;
pub mod transaction;
pub mod work_log;
