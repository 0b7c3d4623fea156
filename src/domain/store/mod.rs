use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::batch::{Batch, ScheduleRow};
use crate::domain::booking::{Booking, NewBooking};
use crate::domain::id::{BatchCode, BookingId, RowId, TrainerId};
use crate::domain::trainer::Trainer;
use crate::error::Result;

pub mod memory;
pub mod prefs;

/// A date-range scoped booking query. The engine never loads the full
/// booking history; every read is bounded by `from..=to`.
#[derive(Debug, Clone)]
pub struct BookingQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub trainer: Option<TrainerId>,
    pub college: Option<String>,
}

impl BookingQuery {
    pub fn range(from: NaiveDate, to: NaiveDate) -> Self {
        BookingQuery { from, to, trainer: None, college: None }
    }

    pub fn for_trainer(mut self, trainer: TrainerId) -> Self {
        self.trainer = Some(trainer);
        self
    }
}

/// Read access to the trainer directory.
#[async_trait]
pub trait TrainerStore: Send + Sync {
    async fn list_trainers(&self) -> Result<Vec<Trainer>>;
    async fn get_trainer(&self, id: &TrainerId) -> Result<Trainer>;
}

/// Persistence of bookings. Ids are assigned by the store on insert.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn query_bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>>;
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking>;
    /// Removes a booking and returns it, so callers can recompute the
    /// affected window.
    async fn delete_booking(&self, id: &BookingId) -> Result<Booking>;
}

/// Read access to batches and their assigned-hours budgets.
#[async_trait]
pub trait BatchStore: Send + Sync {
    async fn get_batch(&self, code: &BatchCode) -> Result<Batch>;
}

/// Persistence of batch schedule rows (sessions).
#[async_trait]
pub trait ScheduleRowStore: Send + Sync {
    async fn get_row(&self, id: &RowId) -> Result<ScheduleRow>;
    async fn rows_for_batch(&self, code: &BatchCode) -> Result<Vec<ScheduleRow>>;
    async fn save_row(&self, row: ScheduleRow) -> Result<()>;
}

/// Simple key-value capability for caller preferences (last-used
/// filters and the like). Injected, never global state.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>>;
    async fn store(&self, key: &str, value: &str) -> Result<()>;
}
