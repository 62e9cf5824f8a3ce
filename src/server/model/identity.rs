//! Request identity and permission evaluation.
//!
//! An [`Identity`] is built for every request from the session user and their group memberships
//! as stored in the database, then passed explicitly to the code that needs it.

use std::fmt;

use entity::auth_user_group::UserGroup;

/// Record type a permission applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Branch,
    Staff,
    WorkLog,
    Transaction,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Branch,
        Resource::Staff,
        Resource::WorkLog,
        Resource::Transaction,
    ];

    pub fn codename(&self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Staff => "staff",
            Self::WorkLog => "work_log",
            Self::Transaction => "transaction",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    View,
    Add,
    Change,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Add, Action::Change, Action::Delete];

    pub fn codename(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Add => "add",
            Self::Change => "change",
            Self::Delete => "delete",
        }
    }
}

/// A named permission such as `view_transaction`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission {
    pub action: Action,
    pub resource: Resource,
}

impl Permission {
    pub const fn new(action: Action, resource: Resource) -> Self {
        Self { action, resource }
    }

    /// Every permission known to the application
    pub fn all() -> impl Iterator<Item = Permission> {
        Resource::ALL.into_iter().flat_map(|resource| {
            Action::ALL
                .into_iter()
                .map(move |action| Permission::new(action, resource))
        })
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.action.codename(), self.resource.codename())
    }
}

/// Which screens a user lands on and may browse freely
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleScope {
    Unrestricted,
    /// Dashboard and login send the user to the work log list instead
    BranchManager,
}

pub static DASHBOARD_PATH: &str = "/api/dashboard";
pub static WORK_LOG_LIST_PATH: &str = "/api/work-logs";

/// Permissions a single group grants
pub fn group_grants(group: UserGroup, permission: Permission) -> bool {
    match group {
        UserGroup::Owner => {
            permission == Permission::new(Action::View, Resource::Transaction)
        }
        UserGroup::BranchManager => {
            matches!(permission.resource, Resource::Staff | Resource::WorkLog)
        }
        UserGroup::Accounting => true,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub username: String,
    pub is_superuser: bool,
    pub groups: Vec<UserGroup>,
}

impl Identity {
    /// Superusers hold every permission, other users the union of their groups' grants
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.is_superuser
            || self
                .groups
                .iter()
                .any(|group| group_grants(*group, permission))
    }

    pub fn permissions(&self) -> Vec<Permission> {
        Permission::all()
            .filter(|permission| self.has_permission(*permission))
            .collect()
    }

    pub fn scope(&self) -> RoleScope {
        if self.groups.contains(&UserGroup::BranchManager) {
            RoleScope::BranchManager
        } else {
            RoleScope::Unrestricted
        }
    }

    /// Where the user is sent after login or when opening the dashboard
    pub fn landing_path(&self) -> &'static str {
        match self.scope() {
            RoleScope::BranchManager => WORK_LOG_LIST_PATH,
            RoleScope::Unrestricted => DASHBOARD_PATH,
        }
    }
}
