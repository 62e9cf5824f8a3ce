//! Server application core modules.
//!
//! HTTP routing, session authentication, database access, form validation, reporting and the
//! printable and spreadsheet renderings of the branchdesk back office.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod export;
pub mod form;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
pub mod view;
