pub mod builder;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use builder::TestBuilder;
pub use error::TestError;
pub use setup::{TestAppState, TestSetup};

use chrono::NaiveDate;

/// Shorthand for a calendar date in test bodies, panics on an impossible date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub mod prelude {
    pub use crate::{
        date, test_setup_with_domain_tables, test_setup_with_tables, TestBuilder, TestError,
        TestSetup,
    };
    pub use entity::{
        auth_user_group::UserGroup,
        branch::BranchKind,
        transaction::{TransactionCategory, TransactionKind},
    };
}
