use serde::{Deserialize, Serialize};

use crate::api::batch_dto::{BatchDto, ScheduleRowDto};
use crate::api::booking_dto::BookingDto;
use crate::api::trainer_dto::TrainerDto;

/// Root of a snapshot file: everything the engine needs for one
/// viewing window, in one document.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SnapshotDto {
    #[serde(default)]
    pub trainers: Vec<TrainerDto>,
    #[serde(default)]
    pub bookings: Vec<BookingDto>,
    #[serde(default)]
    pub batches: Vec<BatchDto>,
    #[serde(default)]
    pub schedule_rows: Vec<ScheduleRowDto>,
}
