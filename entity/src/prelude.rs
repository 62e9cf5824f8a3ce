pub use super::auth_user::Entity as AuthUser;
pub use super::auth_user_group::Entity as AuthUserGroup;
pub use super::branch::Entity as Branch;
pub use super::staff::Entity as Staff;
pub use super::transaction::Entity as Transaction;
pub use super::work_log::Entity as WorkLog;
