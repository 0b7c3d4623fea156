use chrono::{Days, NaiveDate};

use crate::domain::booking::Booking;
use crate::domain::conflict::ConflictIndex;
use crate::domain::id::TrainerId;
use crate::domain::slot::Slot;

/// Default number of free slots returned by a search.
pub const DEFAULT_SLOT_COUNT: usize = 5;
/// Default search horizon in days after "today".
pub const DEFAULT_HORIZON_DAYS: u64 = 90;

/// One available half-day for a trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeSlot {
    pub date: NaiveDate,
    pub slot: Slot,
}

/// Finds up to `count` of the earliest available half-day slots for
/// `trainer`, strictly after `today`, scanning at most `horizon_days`
/// candidate dates in chronological order with AM before PM.
///
/// An exhausted horizon just yields a short or empty list; lack of
/// capacity is not an error.
pub fn free_slots(
    bookings: &[Booking],
    trainer: &TrainerId,
    today: NaiveDate,
    count: usize,
    horizon_days: u64,
) -> Vec<FreeSlot> {
    // Occupancy restricted to this trainer; conflicted (over-booked)
    // slots still count as occupied.
    let own: Vec<Booking> = bookings.iter().filter(|b| b.trainer == *trainer).cloned().collect();
    let index = ConflictIndex::build(&own);

    let mut results = Vec::new();

    for offset in 1..=horizon_days {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };

        let occupied = index.occupied_slots(trainer, date);
        for slot in Slot::ALL {
            if !occupied.contains(&slot) {
                results.push(FreeSlot { date, slot });
                if results.len() == count {
                    return results;
                }
            }
        }
    }

    log::debug!(
        "Free-slot search for trainer '{}' exhausted {}-day horizon with {} result(s)",
        trainer,
        horizon_days,
        results.len()
    );
    results
}
