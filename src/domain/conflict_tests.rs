/// Unit tests for the conflict detector and the slot model it expands
/// through: symmetric flagging, no false conflicts, deterministic
/// recompute over the same snapshot.
#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::booking::Booking;
    use crate::domain::conflict::ConflictIndex;
    use crate::domain::id::{BookingId, TrainerId};
    use crate::domain::slot::{Slot, SlotSpan};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A minimal booking for conflict tests.
    fn booking(id: &str, trainer: &str, date: NaiveDate, span: SlotSpan) -> Booking {
        Booking {
            id: BookingId::new(id),
            trainer: TrainerId::new(trainer),
            date,
            span,
            batch: None,
            college_name: "Test College".to_string(),
            domain: "Rust".to_string(),
        }
    }

    #[test]
    fn expand_span_covers_both_halves_for_full_and_unknown() {
        assert_eq!(SlotSpan::Am.slots(), &[Slot::Am]);
        assert_eq!(SlotSpan::Pm.slots(), &[Slot::Pm]);
        assert_eq!(SlotSpan::Full.slots(), &[Slot::Am, Slot::Pm]);
        assert_eq!(SlotSpan::Unknown.slots(), &[Slot::Am, Slot::Pm]);
    }

    #[test]
    fn parse_span_accepts_both_full_day_orders() {
        assert_eq!(SlotSpan::parse("AM"), SlotSpan::Am);
        assert_eq!(SlotSpan::parse(" pm "), SlotSpan::Pm);
        assert_eq!(SlotSpan::parse("AM&PM"), SlotSpan::Full);
        assert_eq!(SlotSpan::parse("PM&AM"), SlotSpan::Full);
        assert_eq!(SlotSpan::parse(""), SlotSpan::Unknown);
        assert_eq!(SlotSpan::parse("evening"), SlotSpan::Unknown);
    }

    #[test]
    fn full_day_collides_with_half_day_and_both_are_flagged() {
        // One AM and one full-day booking on the same date: both must
        // be flagged, not just one.
        let day = date(2025, 3, 10);
        let bookings =
            vec![booking("b1", "GA-T001", day, SlotSpan::Am), booking("b2", "GA-T001", day, SlotSpan::Full)];

        let index = ConflictIndex::build(&bookings);
        assert!(index.is_conflicted(&bookings[0]));
        assert!(index.is_conflicted(&bookings[1]));
    }

    #[test]
    fn am_and_pm_on_the_same_day_do_not_conflict() {
        let day = date(2025, 3, 10);
        let bookings =
            vec![booking("b1", "GA-T001", day, SlotSpan::Am), booking("b2", "GA-T001", day, SlotSpan::Pm)];

        let index = ConflictIndex::build(&bookings);
        assert!(!index.is_conflicted(&bookings[0]));
        assert!(!index.is_conflicted(&bookings[1]));
    }

    #[test]
    fn same_slot_different_trainers_do_not_conflict() {
        let day = date(2025, 3, 10);
        let bookings =
            vec![booking("b1", "GA-T001", day, SlotSpan::Am), booking("b2", "GA-T002", day, SlotSpan::Am)];

        let index = ConflictIndex::build(&bookings);
        assert!(!index.is_conflicted(&bookings[0]));
        assert!(!index.is_conflicted(&bookings[1]));
    }

    #[test]
    fn same_slot_different_dates_do_not_conflict() {
        let bookings = vec![
            booking("b1", "GA-T001", date(2025, 3, 10), SlotSpan::Pm),
            booking("b2", "GA-T001", date(2025, 3, 11), SlotSpan::Pm),
        ];

        let index = ConflictIndex::build(&bookings);
        assert!(!index.is_conflicted(&bookings[0]));
        assert!(!index.is_conflicted(&bookings[1]));
    }

    #[test]
    fn unknown_span_behaves_like_a_full_day() {
        let day = date(2025, 3, 10);
        let bookings = vec![
            booking("b1", "GA-T001", day, SlotSpan::Unknown),
            booking("b2", "GA-T001", day, SlotSpan::Pm),
        ];

        let index = ConflictIndex::build(&bookings);
        assert!(index.is_conflicted(&bookings[0]));
        assert!(index.is_conflicted(&bookings[1]));
    }

    #[test]
    fn occupied_slots_reports_am_before_pm() {
        let day = date(2025, 3, 10);
        let trainer = TrainerId::new("GA-T001");
        let bookings = vec![booking("b1", "GA-T001", day, SlotSpan::Full)];

        let index = ConflictIndex::build(&bookings);
        assert_eq!(index.occupied_slots(&trainer, day), vec![Slot::Am, Slot::Pm]);
        assert!(index.occupied_slots(&trainer, date(2025, 3, 11)).is_empty());
    }

    #[test]
    fn annotate_is_deterministic_over_the_same_snapshot() {
        let day = date(2025, 3, 10);
        let bookings = vec![
            booking("b1", "GA-T001", day, SlotSpan::Am),
            booking("b2", "GA-T001", day, SlotSpan::Full),
            booking("b3", "GA-T002", day, SlotSpan::Pm),
        ];

        let first: Vec<bool> = ConflictIndex::build(&bookings).annotate(&bookings).iter().map(|a| a.conflict).collect();
        let second: Vec<bool> = ConflictIndex::build(&bookings).annotate(&bookings).iter().map(|a| a.conflict).collect();

        assert_eq!(first, second);
        assert_eq!(first, vec![true, true, false]);
    }
}
