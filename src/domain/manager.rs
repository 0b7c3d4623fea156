use chrono::{Datelike, Days, NaiveDate};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::availability::{self, FreeSlot};
use crate::domain::batch::ScheduleRow;
use crate::domain::booking::{AnnotatedBooking, Booking, NewBooking};
use crate::domain::budget::{self, BatchBudget, RowReckoning};
use crate::domain::conflict::ConflictIndex;
use crate::domain::id::{BatchCode, BookingId, RowId, TrainerId};
use crate::domain::slot::SlotSpan;
use crate::domain::store::{BatchStore, BookingQuery, BookingStore, ScheduleRowStore, TrainerStore};
use crate::domain::utilization;
use crate::error::{Error, Result};

/// The consistent derived view returned after every mutation and by
/// read queries: bookings annotated with conflicts, utilization per
/// trainer and the budget state of every batch visible in the window.
#[derive(Debug)]
pub struct ScheduleView {
    pub year: i32,
    pub month: u32,
    pub bookings: Vec<AnnotatedBooking>,
    pub utilization: HashMap<TrainerId, u8>,
    pub budgets: HashMap<BatchCode, BatchBudget>,
}

/// Result of a successful quick booking: the stored booking plus the
/// recomputed view of its month.
#[derive(Debug)]
pub struct BookingOutcome {
    pub booking: Booking,
    pub view: ScheduleView,
}

/// One field edit to a schedule row, as arriving from the edit surface.
#[derive(Debug, Clone)]
pub enum RowEdit {
    Trainer(Option<TrainerId>),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    DayDuration(Option<SlotSpan>),
    Travel(f64),
    FoodAndStay(f64),
}

impl RowEdit {
    fn apply(self, row: &mut ScheduleRow) {
        match self {
            RowEdit::Trainer(trainer) => row.trainer = trainer,
            RowEdit::StartDate(date) => row.start_date = date,
            RowEdit::EndDate(date) => row.end_date = date,
            RowEdit::DayDuration(duration) => row.day_duration = duration,
            RowEdit::Travel(amount) => row.travel = amount,
            RowEdit::FoodAndStay(amount) => row.food_and_stay = amount,
        }
    }
}

/// Orchestrates booking mutations against the storage collaborators.
///
/// Two deliberately distinct paths:
/// - `create_booking` (quick bookings) enforces slot occupancy and
///   fails with `SlotOccupied`;
/// - `update_schedule_row` (batch scheduling) never blocks, it only
///   recomputes and surfaces the derived values, over-allocation
///   included.
///
/// Check-then-insert on the quick path runs under a per-trainer lock,
/// so two concurrent requests for the same trainer serialize while
/// different trainers proceed independently.
pub struct BookingManager {
    trainers: Arc<dyn TrainerStore>,
    bookings: Arc<dyn BookingStore>,
    batches: Arc<dyn BatchStore>,
    rows: Arc<dyn ScheduleRowStore>,
    trainer_locks: Mutex<HashMap<TrainerId, Arc<Mutex<()>>>>,
}

impl BookingManager {
    pub fn new(
        trainers: Arc<dyn TrainerStore>,
        bookings: Arc<dyn BookingStore>,
        batches: Arc<dyn BatchStore>,
        rows: Arc<dyn ScheduleRowStore>,
    ) -> Self {
        BookingManager { trainers, bookings, batches, rows, trainer_locks: Mutex::new(HashMap::new()) }
    }

    async fn lock_for(&self, trainer: &TrainerId) -> Arc<Mutex<()>> {
        let mut registry = self.trainer_locks.lock().await;
        registry.entry(trainer.clone()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
    }

    /// Creates an ad-hoc ("quick") booking. This is the hard path: the
    /// requested span must be entirely free for the trainer on that
    /// date, otherwise `SlotOccupied` names the colliding slots.
    pub async fn create_booking(&self, request: NewBooking) -> Result<BookingOutcome> {
        // Surface a bad trainer id before taking any lock.
        self.trainers.get_trainer(&request.trainer).await?;

        let lock = self.lock_for(&request.trainer).await;
        let booking = {
            let _guard = lock.lock().await;

            let day = BookingQuery::range(request.date, request.date).for_trainer(request.trainer.clone());
            let existing = self.bookings.query_bookings(&day).await?;

            let index = ConflictIndex::build(&existing);
            let occupied = index.occupied_slots(&request.trainer, request.date);
            let colliding: Vec<_> =
                request.span.slots().iter().copied().filter(|s| occupied.contains(s)).collect();

            if !colliding.is_empty() {
                log::info!(
                    "Rejecting quick booking for trainer '{}' on {}: {:?} occupied",
                    request.trainer,
                    request.date,
                    colliding
                );
                return Err(Error::SlotOccupied {
                    trainer: request.trainer.to_string(),
                    date: request.date,
                    slots: colliding,
                });
            }

            self.bookings.insert_booking(request).await?
        };

        log::info!("Created booking {:?} for trainer '{}' on {}", booking.id, booking.trainer, booking.date);

        let view = self.month_view(booking.date.year(), booking.date.month()).await?;
        Ok(BookingOutcome { booking, view })
    }

    /// Deletes a booking and returns the recomputed view of the month
    /// it occupied. The reference UI keeps this disabled; the engine
    /// carries the capability regardless.
    pub async fn delete_booking(&self, id: &BookingId) -> Result<ScheduleView> {
        let removed = self.bookings.delete_booking(id).await?;
        log::info!("Deleted booking {:?} of trainer '{}' on {}", id, removed.trainer, removed.date);

        self.month_view(removed.date.year(), removed.date.month()).await
    }

    /// Applies one field edit to a schedule row. This is the soft path:
    /// the edit is persisted unconditionally and the batch budget is
    /// reconciled afterwards; an over-allocated batch is surfaced in
    /// the reckoning, never rejected.
    pub async fn update_schedule_row(&self, id: &RowId, edit: RowEdit) -> Result<RowReckoning> {
        let mut row = self.rows.get_row(id).await?;
        edit.apply(&mut row);
        self.rows.save_row(row.clone()).await?;

        let batch = self.batches.get_batch(&row.batch).await?;
        let siblings = self.rows.rows_for_batch(&row.batch).await?;

        let trainer = match &row.trainer {
            Some(trainer_id) => Some(self.trainers.get_trainer(trainer_id).await?),
            None => None,
        };

        let reckoning = budget::reckon_row(&batch, &siblings, &row, trainer.as_ref());
        if reckoning.budget.is_over_allocated() {
            log::warn!(
                "Batch '{}' over-allocated: {} of {} assigned hours scheduled",
                batch.code,
                reckoning.budget.scheduled_hours,
                batch.assigned_hours
            );
        }

        Ok(reckoning)
    }

    /// Next free half-day slots for a trainer, strictly after `today`.
    pub async fn free_slots(
        &self,
        trainer: &TrainerId,
        today: NaiveDate,
        count: usize,
        horizon_days: u64,
    ) -> Result<Vec<FreeSlot>> {
        self.trainers.get_trainer(trainer).await?;

        let to = today
            .checked_add_days(Days::new(horizon_days))
            .ok_or_else(|| Error::InvalidDate(format!("{} + {} days", today, horizon_days)))?;
        let query = BookingQuery::range(today, to).for_trainer(trainer.clone());
        let bookings = self.bookings.query_bookings(&query).await?;

        Ok(availability::free_slots(&bookings, trainer, today, count, horizon_days))
    }

    /// Recomputes the full derived view for one calendar month. The
    /// conflict index is built first; utilization and budgets consume
    /// its snapshot ordering.
    pub async fn month_view(&self, year: i32, month: u32) -> Result<ScheduleView> {
        let from = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidDate(format!("{}-{:02}", year, month)))?;
        let to = NaiveDate::from_ymd_opt(year, month, utilization::days_in_month(year, month))
            .ok_or_else(|| Error::InvalidDate(format!("{}-{:02}", year, month)))?;

        let bookings = self.bookings.query_bookings(&BookingQuery::range(from, to)).await?;

        let index = ConflictIndex::build(&bookings);
        let annotated = index.annotate(&bookings);
        let utilization = utilization::utilization_by_trainer(&bookings, year, month);

        let mut codes: Vec<BatchCode> = bookings.iter().filter_map(|b| b.batch.clone()).collect();
        codes.sort();
        codes.dedup();

        let budgets = self.batch_budgets(codes).await?;

        Ok(ScheduleView { year, month, bookings: annotated, utilization, budgets })
    }

    /// Budget reconciliation for each batch code, fetched concurrently.
    /// A code that no longer resolves is logged and skipped; the view
    /// stays usable.
    async fn batch_budgets(&self, codes: Vec<BatchCode>) -> Result<HashMap<BatchCode, BatchBudget>> {
        let lookups = codes.into_iter().map(|code| async move {
            let batch = self.batches.get_batch(&code).await;
            let rows = self.rows.rows_for_batch(&code).await;
            (code, batch, rows)
        });

        let mut budgets = HashMap::new();
        for (code, batch, rows) in join_all(lookups).await {
            match (batch, rows) {
                (Ok(batch), Ok(rows)) => {
                    budgets.insert(code, budget::reconcile(&batch, &rows));
                }
                (Err(Error::BatchNotFound(missing)), _) => {
                    log::warn!("Bookings reference unknown batch '{}', skipping its budget", missing);
                }
                (Err(e), _) | (_, Err(e)) => return Err(e),
            }
        }

        Ok(budgets)
    }
}
