use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::slot::Slot;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse snapshot JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write CSV export: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid calendar date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Trainer '{0}' not found")]
    TrainerNotFound(String),

    #[error("Booking '{0}' not found")]
    BookingNotFound(String),

    #[error("Batch '{0}' not found")]
    BatchNotFound(String),

    #[error("Schedule row '{0}' not found")]
    RowNotFound(String),

    #[error("Trainer '{trainer}' already occupies {slots:?} on {date}")]
    SlotOccupied { trainer: String, date: NaiveDate, slots: Vec<Slot> },

    #[error("Storage backend unavailable: {0}")]
    StorageUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
