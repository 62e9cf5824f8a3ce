//! Database fixtures for test execution.
//!
//! Each submodule hangs an accessor off `TestSetup` that inserts records with sensible
//! defaults, leaving tests to specify only the fields they assert on.

pub mod branch;
pub mod staff;
pub mod transaction;
pub mod user;
pub mod work_log;
