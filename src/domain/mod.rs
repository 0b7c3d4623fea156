use chrono::NaiveDate;

use crate::error::{Error, Result};

pub mod availability;
pub mod batch;
pub mod booking;
pub mod budget;
pub mod conflict;
pub mod id;
pub mod manager;
pub mod slot;
pub mod store;
pub mod trainer;
pub mod utilization;

mod availability_tests;
mod conflict_tests;

/// Parses a wire-format calendar date (`YYYY-MM-DD`).
pub fn parse_wire_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(raw.to_string()))
}
