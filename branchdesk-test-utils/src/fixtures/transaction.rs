use chrono::{NaiveDate, Utc};
use entity::transaction::{TransactionCategory, TransactionKind};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn transaction<'a>(&'a mut self) -> TransactionFixtures<'a> {
        TransactionFixtures { setup: self }
    }
}

pub struct TransactionFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> TransactionFixtures<'a> {
    /// Insert a cash transaction, amount given in cents
    pub async fn insert_transaction(
        &self,
        branch_id: i32,
        kind: TransactionKind,
        amount_cents: i64,
        date: NaiveDate,
    ) -> Result<entity::transaction::Model, TestError> {
        Ok(
            entity::prelude::Transaction::insert(entity::transaction::ActiveModel {
                branch_id: ActiveValue::Set(branch_id),
                kind: ActiveValue::Set(kind),
                category: ActiveValue::Set(TransactionCategory::Cash),
                description: ActiveValue::Set(String::new()),
                amount_cents: ActiveValue::Set(amount_cents),
                date: ActiveValue::Set(date),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
