#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::availability::{FreeSlot, free_slots};
    use crate::domain::booking::Booking;
    use crate::domain::id::{BookingId, TrainerId};
    use crate::domain::slot::{Slot, SlotSpan};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(id: &str, trainer: &str, date: NaiveDate, span: SlotSpan) -> Booking {
        Booking {
            id: BookingId::new(id),
            trainer: TrainerId::new(trainer),
            date,
            span,
            batch: None,
            college_name: String::new(),
            domain: String::new(),
        }
    }

    #[test]
    fn empty_calendar_yields_the_first_slots_after_today() {
        let trainer = TrainerId::new("GA-T002");
        let today = date(2025, 3, 1);

        let found = free_slots(&[], &trainer, today, 3, 90);

        assert_eq!(
            found,
            vec![
                FreeSlot { date: date(2025, 3, 2), slot: Slot::Am },
                FreeSlot { date: date(2025, 3, 2), slot: Slot::Pm },
                FreeSlot { date: date(2025, 3, 3), slot: Slot::Am },
            ]
        );
    }

    #[test]
    fn gaps_in_a_solid_month_are_found_in_order() {
        // March fully booked except March 15 AM and March 20 PM.
        let trainer = TrainerId::new("GA-T002");
        let mut bookings = Vec::new();

        for day in 1..=31 {
            let d = date(2025, 3, day);
            match day {
                15 => bookings.push(booking(&format!("b{}", day), "GA-T002", d, SlotSpan::Pm)),
                20 => bookings.push(booking(&format!("b{}", day), "GA-T002", d, SlotSpan::Am)),
                _ => bookings.push(booking(&format!("b{}", day), "GA-T002", d, SlotSpan::Full)),
            }
        }

        let found = free_slots(&bookings, &trainer, date(2025, 3, 1), 4, 90);

        assert_eq!(
            found,
            vec![
                FreeSlot { date: date(2025, 3, 15), slot: Slot::Am },
                FreeSlot { date: date(2025, 3, 20), slot: Slot::Pm },
                FreeSlot { date: date(2025, 4, 1), slot: Slot::Am },
                FreeSlot { date: date(2025, 4, 1), slot: Slot::Pm },
            ]
        );
    }

    #[test]
    fn results_never_overlap_existing_bookings() {
        let trainer = TrainerId::new("GA-T001");
        let bookings = vec![
            booking("b1", "GA-T001", date(2025, 6, 2), SlotSpan::Am),
            booking("b2", "GA-T001", date(2025, 6, 3), SlotSpan::Full),
        ];

        let found = free_slots(&bookings, &trainer, date(2025, 6, 1), 5, 90);

        for free in &found {
            for b in &bookings {
                if b.date == free.date {
                    assert!(!b.span.slots().contains(&free.slot), "{:?} overlaps {:?}", free, b);
                }
            }
        }
        // June 2 PM is the first gap, June 3 is fully taken.
        assert_eq!(found[0], FreeSlot { date: date(2025, 6, 2), slot: Slot::Pm });
        assert_eq!(found[1], FreeSlot { date: date(2025, 6, 4), slot: Slot::Am });
    }

    #[test]
    fn other_trainers_bookings_do_not_block_slots() {
        let trainer = TrainerId::new("GA-T001");
        let bookings = vec![booking("b1", "GA-T099", date(2025, 6, 2), SlotSpan::Full)];

        let found = free_slots(&bookings, &trainer, date(2025, 6, 1), 1, 90);
        assert_eq!(found, vec![FreeSlot { date: date(2025, 6, 2), slot: Slot::Am }]);
    }

    #[test]
    fn exhausted_horizon_returns_a_partial_list_without_error() {
        let trainer = TrainerId::new("GA-T001");
        let mut bookings = Vec::new();
        // Two-day horizon, day one fully booked.
        bookings.push(booking("b1", "GA-T001", date(2025, 6, 2), SlotSpan::Full));

        let found = free_slots(&bookings, &trainer, date(2025, 6, 1), 5, 2);

        assert_eq!(
            found,
            vec![
                FreeSlot { date: date(2025, 6, 3), slot: Slot::Am },
                FreeSlot { date: date(2025, 6, 3), slot: Slot::Pm },
            ]
        );
    }

    #[test]
    fn ordering_is_strictly_increasing_with_am_before_pm() {
        let trainer = TrainerId::new("GA-T001");
        let found = free_slots(&[], &trainer, date(2025, 6, 1), 10, 90);

        for pair in found.windows(2) {
            assert!((pair[0].date, pair[0].slot) < (pair[1].date, pair[1].slot));
        }
    }
}
