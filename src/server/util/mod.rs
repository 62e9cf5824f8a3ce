//! Helpers shared by the data, service and controller layers.

pub mod money;
pub mod pagination;
pub mod period;
pub mod query;
