pub use sea_orm_migration::prelude::*;

mod m20251101_000001_branch;
mod m20251101_000002_staff;
mod m20251101_000003_work_log;
mod m20251101_000004_transaction;
mod m20251101_000005_auth_user;
mod m20251101_000006_auth_user_group;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_branch::Migration),
            Box::new(m20251101_000002_staff::Migration),
            Box::new(m20251101_000003_work_log::Migration),
            Box::new(m20251101_000004_transaction::Migration),
            Box::new(m20251101_000005_auth_user::Migration),
            Box::new(m20251101_000006_auth_user_group::Migration),
        ]
    }
}
