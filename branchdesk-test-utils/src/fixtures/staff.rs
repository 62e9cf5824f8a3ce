use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn staff<'a>(&'a mut self) -> StaffFixtures<'a> {
        StaffFixtures { setup: self }
    }
}

pub struct StaffFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> StaffFixtures<'a> {
    pub async fn insert_staff(
        &self,
        branch_id: i32,
        first_name: &str,
        last_name: &str,
        position: &str,
    ) -> Result<entity::staff::Model, TestError> {
        Ok(
            entity::prelude::Staff::insert(entity::staff::ActiveModel {
                branch_id: ActiveValue::Set(branch_id),
                first_name: ActiveValue::Set(first_name.to_string()),
                last_name: ActiveValue::Set(last_name.to_string()),
                position: ActiveValue::Set(position.to_string()),
                hire_date: ActiveValue::Set(NaiveDate::default()),
                phone: ActiveValue::Set("+90 532 555 0101".to_string()),
                email: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
