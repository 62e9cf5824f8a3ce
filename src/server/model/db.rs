//! Database model type aliases.
//!
//! Short names for the SeaORM models of the `entity` crate used across the server.

/// Café or hotel branch.
pub type BranchModel = entity::branch::Model;

/// Employee attached to a single branch.
pub type StaffModel = entity::staff::Model;

/// Hours logged by a staff member on one day, stored in hundredths of an hour.
pub type WorkLogModel = entity::work_log::Model;

/// Income or expense entry of a branch, stored in cents.
pub type TransactionModel = entity::transaction::Model;

/// Login account.
pub type UserModel = entity::auth_user::Model;

/// Membership of a user in a permission group.
pub type UserGroupModel = entity::auth_user_group::Model;
