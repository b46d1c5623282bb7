//! Attendance ledger and reporting core for a clinic time keeper.
//!
//! Tracks check-in/check-out sessions for staff and volunteers in a local
//! sqlite store, keeps per-user lifetime hour totals and produces
//! weekly/monthly/all-time reports. The interactive layer lives elsewhere;
//! it calls into [`service`] with pre-validated strings and renders the
//! results or errors.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod utils;

pub use error::{Result, TimeLogError};
