use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::domain::booking::Booking;
use crate::domain::id::TrainerId;

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match (first, next_first) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        // Out-of-range month; callers validate, this keeps the math total.
        _ => 30,
    }
}

/// Percentage of one trainer's half-day capacity in a month that is
/// booked, rounded, clamped to 100.
///
/// Capacity is `days_in_month * 2` half-days. Each booking contributes
/// one used half-day per occupied slot, so an undetected double-booking
/// can over-count; the clamp absorbs that on the read side.
pub fn monthly_utilization(bookings: &[Booking], trainer: &TrainerId, year: i32, month: u32) -> u8 {
    let capacity = days_in_month(year, month) * 2;

    let used: u32 = bookings
        .iter()
        .filter(|b| b.trainer == *trainer && b.date.year() == year && b.date.month() == month)
        .map(|b| b.span.slots().len() as u32)
        .sum();

    let percent = (f64::from(used) / f64::from(capacity) * 100.0).round();
    percent.min(100.0) as u8
}

/// Utilization for every trainer that appears in the snapshot.
pub fn utilization_by_trainer(bookings: &[Booking], year: i32, month: u32) -> HashMap<TrainerId, u8> {
    let mut result = HashMap::new();

    for booking in bookings {
        if !result.contains_key(&booking.trainer) {
            let percent = monthly_utilization(bookings, &booking.trainer, year, month);
            result.insert(booking.trainer.clone(), percent);
        }
    }

    result
}
