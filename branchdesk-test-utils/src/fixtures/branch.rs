use chrono::Utc;
use entity::branch::BranchKind;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn branch<'a>(&'a mut self) -> BranchFixtures<'a> {
        BranchFixtures { setup: self }
    }
}

pub struct BranchFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> BranchFixtures<'a> {
    pub async fn insert_branch(
        &self,
        name: &str,
        kind: BranchKind,
    ) -> Result<entity::branch::Model, TestError> {
        Ok(
            entity::prelude::Branch::insert(entity::branch::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                kind: ActiveValue::Set(kind),
                address: ActiveValue::Set(format!("1 {} Street", name)),
                phone: ActiveValue::Set("+90 212 555 0100".to_string()),
                manager: ActiveValue::Set("Deniz Kaya".to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
