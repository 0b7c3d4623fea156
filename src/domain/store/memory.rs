use async_trait::async_trait;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::api::snapshot_dto::SnapshotDto;
use crate::domain::batch::{Batch, ScheduleRow};
use crate::domain::booking::{Booking, NewBooking};
use crate::domain::id::{BatchCode, BookingId, RowId, TrainerId};
use crate::domain::store::{BatchStore, BookingQuery, BookingStore, ScheduleRowStore, TrainerStore};
use crate::domain::trainer::Trainer;
use crate::error::{Error, Result};

new_key_type! {
    struct BookingKey;
}

#[derive(Debug)]
struct BookingStoreInner {
    /// Booking storage.
    slots: SlotMap<BookingKey, Booking>,

    /// Index lookup of the internal key by the public booking id.
    id_index: HashMap<BookingId, BookingKey>,
}

/// In-memory booking store backing tests and the CLI; also the
/// reference semantics for any real backend.
#[derive(Debug, Clone)]
pub struct MemoryBookingStore {
    /// Both maps are protected with a single lock.
    inner: Arc<RwLock<BookingStoreInner>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(BookingStoreInner { slots: SlotMap::with_key(), id_index: HashMap::new() })) }
    }

    /// Seeds a booking that already carries its id (snapshot load).
    pub fn add(&self, booking: Booking) -> BookingId {
        let mut guard = self.inner.write().expect("RwLock poisoned");
        let id = booking.id.clone();
        let key = guard.slots.insert(booking);
        guard.id_index.insert(id.clone(), key);
        id
    }
}

impl Default for MemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn query_bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>> {
        let guard = self.inner.read().expect("RwLock poisoned");

        let mut found: Vec<Booking> = guard
            .slots
            .values()
            .filter(|b| b.date >= query.from && b.date <= query.to)
            .filter(|b| query.trainer.as_ref().is_none_or(|t| b.trainer == *t))
            .filter(|b| query.college.as_ref().is_none_or(|c| b.college_name == *c))
            .cloned()
            .collect();

        found.sort_by(|a, b| (a.date, &a.trainer).cmp(&(b.date, &b.trainer)));
        Ok(found)
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking> {
        let id = BookingId::new(Uuid::new_v4().to_string());
        let booking = booking.into_booking(id.clone());
        self.add(booking.clone());

        log::debug!("Inserted booking {:?} for trainer '{}' on {}", id, booking.trainer, booking.date);
        Ok(booking)
    }

    async fn delete_booking(&self, id: &BookingId) -> Result<Booking> {
        let mut guard = self.inner.write().expect("RwLock poisoned");

        let key = guard.id_index.remove(id).ok_or_else(|| Error::BookingNotFound(id.to_string()))?;
        let removed = guard.slots.remove(key).ok_or_else(|| Error::BookingNotFound(id.to_string()))?;

        log::debug!("Deleted booking {:?}", id);
        Ok(removed)
    }
}

/// In-memory trainer directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTrainerStore {
    inner: Arc<RwLock<HashMap<TrainerId, Trainer>>>,
}

impl MemoryTrainerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, trainer: Trainer) {
        self.inner.write().expect("RwLock poisoned").insert(trainer.id.clone(), trainer);
    }
}

#[async_trait]
impl TrainerStore for MemoryTrainerStore {
    async fn list_trainers(&self) -> Result<Vec<Trainer>> {
        let guard = self.inner.read().expect("RwLock poisoned");
        let mut trainers: Vec<Trainer> = guard.values().cloned().collect();
        trainers.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(trainers)
    }

    async fn get_trainer(&self, id: &TrainerId) -> Result<Trainer> {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.get(id).cloned().ok_or_else(|| Error::TrainerNotFound(id.to_string()))
    }
}

/// In-memory batch directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBatchStore {
    inner: Arc<RwLock<HashMap<BatchCode, Batch>>>,
}

impl MemoryBatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, batch: Batch) {
        self.inner.write().expect("RwLock poisoned").insert(batch.code.clone(), batch);
    }
}

#[async_trait]
impl BatchStore for MemoryBatchStore {
    async fn get_batch(&self, code: &BatchCode) -> Result<Batch> {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.get(code).cloned().ok_or_else(|| Error::BatchNotFound(code.to_string()))
    }
}

/// In-memory schedule-row store.
#[derive(Debug, Clone, Default)]
pub struct MemoryScheduleRowStore {
    inner: Arc<RwLock<HashMap<RowId, ScheduleRow>>>,
}

impl MemoryScheduleRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, row: ScheduleRow) {
        self.inner.write().expect("RwLock poisoned").insert(row.id.clone(), row);
    }
}

#[async_trait]
impl ScheduleRowStore for MemoryScheduleRowStore {
    async fn get_row(&self, id: &RowId) -> Result<ScheduleRow> {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.get(id).cloned().ok_or_else(|| Error::RowNotFound(id.to_string()))
    }

    async fn rows_for_batch(&self, code: &BatchCode) -> Result<Vec<ScheduleRow>> {
        let guard = self.inner.read().expect("RwLock poisoned");
        let mut rows: Vec<ScheduleRow> = guard.values().filter(|r| r.batch == *code).cloned().collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn save_row(&self, row: ScheduleRow) -> Result<()> {
        self.inner.write().expect("RwLock poisoned").insert(row.id.clone(), row);
        Ok(())
    }
}

/// The full set of in-memory stores, seeded from one snapshot file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStores {
    pub trainers: MemoryTrainerStore,
    pub bookings: MemoryBookingStore,
    pub batches: MemoryBatchStore,
    pub rows: MemoryScheduleRowStore,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds all stores from a parsed snapshot DTO. Malformed dates
    /// are hard errors; malformed spans fall back per the slot model.
    pub fn from_snapshot(dto: SnapshotDto) -> Result<Self> {
        let stores = MemoryStores::new();

        for trainer_dto in dto.trainers {
            stores.trainers.add(Trainer::from(trainer_dto));
        }
        for booking_dto in dto.bookings {
            stores.bookings.add(Booking::try_from(booking_dto)?);
        }
        for batch_dto in dto.batches {
            stores.batches.add(Batch::from(batch_dto));
        }
        for row_dto in dto.schedule_rows {
            stores.rows.add(ScheduleRow::try_from(row_dto)?);
        }

        Ok(stores)
    }
}
