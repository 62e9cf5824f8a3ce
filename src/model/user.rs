use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub is_superuser: bool,
    pub groups: Vec<String>,
    /// Branch managers only see staff and work log screens
    pub branch_manager_restricted: bool,
    /// Permission codenames such as `view_transaction`
    pub permissions: Vec<String>,
}
