use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::batch::{Batch, ScheduleRow};
use crate::domain::id::{BatchCode, RowId};
use crate::domain::slot::SlotSpan;
use crate::domain::trainer::Trainer;

/// Counts weekdays between `start` and `end`, inclusive of both
/// endpoints. A one-day session (`end == start`) counts as one day;
/// `end` before `start` counts as zero.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u32
}

/// Hours one schedule row contributes against its batch's budget:
/// business days of the run times the hours of its daily duration.
/// An incomplete row (missing dates or duration) contributes zero.
pub fn session_hours(row: &ScheduleRow) -> u32 {
    match (row.start_date, row.end_date, row.day_duration) {
        (Some(start), Some(end), Some(duration)) => business_days_between(start, end) * duration.hours(),
        _ => 0,
    }
}

/// Reconciliation of a batch's fixed hour budget against its scheduled
/// sessions.
///
/// `remaining` is the raw signed value; a negative number means the
/// batch is over-allocated and must be surfaced prominently, never
/// silently clamped. Only `displayed_remaining` applies the display
/// floor of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchBudget {
    pub batch: BatchCode,
    pub assigned_hours: u32,
    pub scheduled_hours: u32,
    pub remaining: i64,
    pub displayed_remaining: u32,
}

impl BatchBudget {
    pub fn is_over_allocated(&self) -> bool {
        self.remaining < 0
    }
}

/// Sums the session hours of all `rows` belonging to `batch` and
/// reconciles them against the assigned budget. Rows of other batches
/// are ignored so a mixed snapshot can be passed as-is.
pub fn reconcile(batch: &Batch, rows: &[ScheduleRow]) -> BatchBudget {
    let scheduled_hours: u32 = rows.iter().filter(|r| r.batch == batch.code).map(session_hours).sum();

    let remaining = i64::from(batch.assigned_hours) - i64::from(scheduled_hours);

    BatchBudget {
        batch: batch.code.clone(),
        assigned_hours: batch.assigned_hours,
        scheduled_hours,
        remaining,
        displayed_remaining: remaining.max(0) as u32,
    }
}

/// Session cost quote for one row day: the trainer's configured rate,
/// halved for a half-day duration. Not multiplied by the run length;
/// this matches how the source system prices rows.
pub fn row_cost(trainer: &Trainer, duration: SlotSpan) -> f64 {
    let factor = if duration.is_full_day() { 1.0 } else { 0.5 };
    trainer.rate * factor
}

/// The derived view recomputed on any field edit to a schedule row.
#[derive(Debug, Clone)]
pub struct RowReckoning {
    pub row: RowId,
    pub session_hours: u32,
    pub budget: BatchBudget,
    /// Zero while the row has no trainer or duration yet.
    pub cost: f64,
    /// `cost + travel + food_and_stay`; the latter two are free-form
    /// inputs, not computed here.
    pub total_amount: f64,
}

/// Recomputes one row's hours, the batch reconciliation and the row's
/// monetary totals. `trainer` is the resolved trainer of the row, if
/// it has one assigned.
pub fn reckon_row(batch: &Batch, rows: &[ScheduleRow], row: &ScheduleRow, trainer: Option<&Trainer>) -> RowReckoning {
    let hours = session_hours(row);

    // Hours of every *other* row of this batch, then this row on top;
    // equivalent to reconciling the full set, spelled out this way to
    // mirror the edit-time recomputation.
    let other_hours: u32 =
        rows.iter().filter(|r| r.batch == batch.code && r.id != row.id).map(session_hours).sum();
    let remaining = i64::from(batch.assigned_hours) - i64::from(other_hours) - i64::from(hours);

    let budget = BatchBudget {
        batch: batch.code.clone(),
        assigned_hours: batch.assigned_hours,
        scheduled_hours: other_hours + hours,
        remaining,
        displayed_remaining: remaining.max(0) as u32,
    };

    let cost = match (trainer, row.day_duration) {
        (Some(trainer), Some(duration)) => row_cost(trainer, duration),
        _ => 0.0,
    };

    RowReckoning {
        row: row.id.clone(),
        session_hours: hours,
        budget,
        cost,
        total_amount: cost + row.travel + row.food_and_stay,
    }
}
