use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn work_log<'a>(&'a mut self) -> WorkLogFixtures<'a> {
        WorkLogFixtures { setup: self }
    }
}

pub struct WorkLogFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> WorkLogFixtures<'a> {
    /// Insert a work log with an empty description, hours given in hundredths
    pub async fn insert_work_log(
        &self,
        staff_id: i32,
        date: NaiveDate,
        hours_hundredths: i64,
    ) -> Result<entity::work_log::Model, TestError> {
        self.insert_work_log_with_description(staff_id, date, hours_hundredths, "")
            .await
    }

    pub async fn insert_work_log_with_description(
        &self,
        staff_id: i32,
        date: NaiveDate,
        hours_hundredths: i64,
        description: &str,
    ) -> Result<entity::work_log::Model, TestError> {
        Ok(
            entity::prelude::WorkLog::insert(entity::work_log::ActiveModel {
                staff_id: ActiveValue::Set(staff_id),
                date: ActiveValue::Set(date),
                hours_hundredths: ActiveValue::Set(hours_hundredths),
                description: ActiveValue::Set(description.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
