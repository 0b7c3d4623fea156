use chrono::NaiveDate;

use crate::api::batch_dto::{BatchDto, ScheduleRowDto};
use crate::domain::id::{BatchCode, RowId, TrainerId};
use crate::domain::parse_wire_date;
use crate::domain::slot::SlotSpan;
use crate::error::Error;

/// A training cohort with a fixed total-hours budget.
///
/// `assigned_hours` is set once at batch initiation by an external flow
/// and is a read-only input for the budget tracker.
#[derive(Debug, Clone)]
pub struct Batch {
    pub code: BatchCode,
    pub assigned_hours: u32,
}

impl From<BatchDto> for Batch {
    fn from(dto: BatchDto) -> Self {
        Batch { code: BatchCode::new(dto.batch_code), assigned_hours: dto.assigned_hours }
    }
}

/// One schedule row (session) of a batch: a contiguous run of business
/// days assigned to one trainer at a uniform daily duration.
///
/// Rows are edited field by field in the reference UI, so every
/// scheduling field is optional; an incomplete row simply contributes
/// zero hours until it is filled in.
#[derive(Debug, Clone)]
pub struct ScheduleRow {
    pub id: RowId,
    pub batch: BatchCode,
    pub trainer: Option<TrainerId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub day_duration: Option<SlotSpan>,
    /// Free-form monetary inputs, passed through into the row total.
    pub travel: f64,
    pub food_and_stay: f64,
}

impl TryFrom<ScheduleRowDto> for ScheduleRow {
    type Error = Error;

    fn try_from(dto: ScheduleRowDto) -> Result<Self, Self::Error> {
        let start_date = dto.start_date.as_deref().map(parse_wire_date).transpose()?;
        let end_date = dto.end_date.as_deref().map(parse_wire_date).transpose()?;

        Ok(ScheduleRow {
            id: RowId::new(dto.id),
            batch: BatchCode::new(dto.batch_code),
            trainer: dto.trainer_id.map(TrainerId::new),
            start_date,
            end_date,
            day_duration: dto.day_duration.as_deref().map(SlotSpan::parse),
            travel: dto.travel.unwrap_or(0.0),
            food_and_stay: dto.food_and_stay.unwrap_or(0.0),
        })
    }
}
