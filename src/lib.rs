use std::path::Path;
use std::sync::Arc;

use crate::api::snapshot_dto::SnapshotDto;
use crate::domain::manager::BookingManager;
use crate::domain::store::memory::MemoryStores;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod export;
pub mod loader;
pub mod logger;

/// Loads a snapshot file, seeds in-memory stores from it and wires up
/// a [`BookingManager`] over them.
///
/// The stores are returned alongside the manager so callers (the CLI,
/// tests) can inspect or extend the seeded data directly.
pub fn engine_from_snapshot(path: impl AsRef<Path>) -> Result<(BookingManager, MemoryStores)> {
    let dto: SnapshotDto = parse_json_file(path)?;
    log::info!(
        "Snapshot parsed: {} trainer(s), {} booking(s), {} batch(es), {} schedule row(s)",
        dto.trainers.len(),
        dto.bookings.len(),
        dto.batches.len(),
        dto.schedule_rows.len()
    );

    let stores = MemoryStores::from_snapshot(dto)?;
    let manager = BookingManager::new(
        Arc::new(stores.trainers.clone()),
        Arc::new(stores.bookings.clone()),
        Arc::new(stores.batches.clone()),
        Arc::new(stores.rows.clone()),
    );

    Ok((manager, stores))
}
