//! Declarative test builder.
//!
//! Configuration calls are queued and executed together by `build()`, so a test can describe
//! its tables and seeded users in one chain.

use entity::auth_user_group::UserGroup;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, setup::domain_tables, TestSetup};

struct QueuedUser {
    username: String,
    password: String,
    is_superuser: bool,
    groups: Vec<UserGroup>,
}

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_domain_tables: bool,
    users: Vec<QueuedUser>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_domain_tables: false,
            users: Vec::new(),
        }
    }

    /// Create every branch, staff, work log, transaction and account table.
    pub fn with_domain_tables(mut self) -> Self {
        self.include_domain_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Queue an account with the given password and group memberships.
    pub fn with_user(
        mut self,
        username: &str,
        password: &str,
        is_superuser: bool,
        groups: &[UserGroup],
    ) -> Self {
        self.users.push(QueuedUser {
            username: username.to_string(),
            password: password.to_string(),
            is_superuser,
            groups: groups.to_vec(),
        });
        self
    }

    pub async fn build(self) -> Result<TestSetup, TestError> {
        let mut setup = TestSetup::new().await?;

        let mut all_tables = Vec::new();
        if self.include_domain_tables {
            all_tables.extend(domain_tables());
        }
        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for user in self.users {
            setup
                .user()
                .insert_user(&user.username, &user.password, user.is_superuser, &user.groups)
                .await?;
        }

        Ok(setup)
    }
}
