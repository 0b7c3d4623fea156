use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::booking::{AnnotatedBooking, Booking};
use crate::domain::id::TrainerId;
use crate::domain::slot::Slot;

/// Key of one occupied half-day: who, when, which half.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SlotKey {
    trainer: TrainerId,
    date: NaiveDate,
    slot: Slot,
}

/// Occupancy index over an immutable snapshot of bookings.
///
/// Built from scratch on every recomputation pass; a fresh index from
/// the same snapshot is always identical, so there is no incremental
/// state to get out of sync. Detection is advisory: the index flags
/// overlaps, it never prevents them.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    counts: HashMap<SlotKey, u32>,
}

impl ConflictIndex {
    /// Builds the counting index by expanding every booking's span into
    /// its half-day slots. O(N) over bookings, at most two entries per
    /// booking.
    pub fn build(bookings: &[Booking]) -> ConflictIndex {
        let mut counts: HashMap<SlotKey, u32> = HashMap::new();

        for booking in bookings {
            for slot in booking.span.slots() {
                let key = SlotKey { trainer: booking.trainer.clone(), date: booking.date, slot: *slot };
                *counts.entry(key).or_insert(0) += 1;
            }
        }

        ConflictIndex { counts }
    }

    fn count(&self, trainer: &TrainerId, date: NaiveDate, slot: Slot) -> u32 {
        let key = SlotKey { trainer: trainer.clone(), date, slot };
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// True if any half-day occupied by `booking` is claimed more than
    /// once. A full-day booking therefore collides with any half-day
    /// booking for the same trainer and date.
    pub fn is_conflicted(&self, booking: &Booking) -> bool {
        booking.span.slots().iter().any(|slot| self.count(&booking.trainer, booking.date, *slot) > 1)
    }

    /// The occupied half-days of one trainer on one date, in AM/PM
    /// order. This is the occupancy view consumed by the free-slot
    /// finder and by the quick-booking check.
    pub fn occupied_slots(&self, trainer: &TrainerId, date: NaiveDate) -> Vec<Slot> {
        Slot::ALL.into_iter().filter(|slot| self.count(trainer, date, *slot) > 0).collect()
    }

    /// Annotates every booking of the snapshot with its conflict flag.
    pub fn annotate(&self, bookings: &[Booking]) -> Vec<AnnotatedBooking> {
        bookings
            .iter()
            .map(|booking| AnnotatedBooking { booking: booking.clone(), conflict: self.is_conflicted(booking) })
            .collect()
    }
}
