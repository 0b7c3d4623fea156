use chrono::NaiveDate;
use std::sync::Arc;

use trainer_scheduler::domain::batch::{Batch, ScheduleRow};
use trainer_scheduler::domain::booking::NewBooking;
use trainer_scheduler::domain::id::{BatchCode, BookingId, RowId, TrainerId};
use trainer_scheduler::domain::manager::{BookingManager, RowEdit};
use trainer_scheduler::domain::slot::{Slot, SlotSpan};
use trainer_scheduler::domain::store::ScheduleRowStore;
use trainer_scheduler::domain::store::memory::MemoryStores;
use trainer_scheduler::domain::trainer::{PaymentMode, Trainer};
use trainer_scheduler::error::Error;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_booking(trainer: &str, date: NaiveDate, span: SlotSpan) -> NewBooking {
    NewBooking {
        trainer: TrainerId::new(trainer),
        date,
        span,
        batch: None,
        college_name: "Green Valley".to_string(),
        domain: "Embedded".to_string(),
    }
}

fn setup() -> (BookingManager, MemoryStores) {
    let stores = MemoryStores::new();

    stores.trainers.add(Trainer {
        id: TrainerId::new("GA-T003"),
        name: "Priya".to_string(),
        rate: 6000.0,
        payment_mode: PaymentMode::PerDay,
    });

    let manager = BookingManager::new(
        Arc::new(stores.trainers.clone()),
        Arc::new(stores.bookings.clone()),
        Arc::new(stores.batches.clone()),
        Arc::new(stores.rows.clone()),
    );
    (manager, stores)
}

#[tokio::test]
async fn quick_booking_succeeds_on_a_free_slot() {
    let (manager, _stores) = setup();

    let outcome = manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Pm)).await.unwrap();

    assert_eq!(outcome.booking.trainer, TrainerId::new("GA-T003"));
    assert_eq!(outcome.booking.span, SlotSpan::Pm);
    // The recomputed view of June contains the new booking, unconflicted.
    assert_eq!(outcome.view.bookings.len(), 1);
    assert!(!outcome.view.bookings[0].conflict);
}

#[tokio::test]
async fn quick_booking_into_an_occupied_slot_is_rejected() {
    let (manager, _stores) = setup();

    manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Pm)).await.unwrap();

    let err = manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Pm)).await.unwrap_err();
    match err {
        Error::SlotOccupied { trainer, date: d, slots } => {
            assert_eq!(trainer, "GA-T003");
            assert_eq!(d, date(2025, 6, 1));
            assert_eq!(slots, vec![Slot::Pm]);
        }
        other => panic!("expected SlotOccupied, got {:?}", other),
    }
}

#[tokio::test]
async fn full_day_request_collides_with_any_half_day() {
    let (manager, _stores) = setup();

    manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Am)).await.unwrap();

    let err = manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Full)).await.unwrap_err();
    assert!(matches!(err, Error::SlotOccupied { ref slots, .. } if slots == &vec![Slot::Am]));

    // The other half is still free.
    manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Pm)).await.unwrap();
}

#[tokio::test]
async fn booking_an_unknown_trainer_fails() {
    let (manager, _stores) = setup();

    let err = manager.create_booking(new_booking("GA-T999", date(2025, 6, 1), SlotSpan::Am)).await.unwrap_err();
    assert!(matches!(err, Error::TrainerNotFound(_)));
}

#[tokio::test]
async fn concurrent_requests_for_the_same_slot_commit_exactly_once() {
    let (manager, _stores) = setup();
    let manager = Arc::new(manager);

    let a = manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Am));
    let b = manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Am));
    let (first, second) = tokio::join!(a, b);

    let successes = [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one of two racing bookings may win the slot");
}

#[tokio::test]
async fn deleting_a_booking_frees_its_slot() {
    let (manager, _stores) = setup();

    let outcome = manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Am)).await.unwrap();
    let view = manager.delete_booking(&outcome.booking.id).await.unwrap();
    assert!(view.bookings.is_empty());

    // The slot can be booked again.
    manager.create_booking(new_booking("GA-T003", date(2025, 6, 1), SlotSpan::Am)).await.unwrap();
}

#[tokio::test]
async fn deleting_an_unknown_booking_reports_not_found() {
    let (manager, _stores) = setup();

    let err = manager.delete_booking(&BookingId::new("no-such-booking")).await.unwrap_err();
    assert!(matches!(err, Error::BookingNotFound(_)));
}

#[tokio::test]
async fn row_edits_reconcile_but_never_block_over_allocation() {
    let (manager, stores) = setup();

    stores.batches.add(Batch { code: BatchCode::new("BATCH-1"), assigned_hours: 40 });
    // Existing row worth 30h (Mon-Fri full days).
    stores.rows.add(ScheduleRow {
        id: RowId::new("r1"),
        batch: BatchCode::new("BATCH-1"),
        trainer: Some(TrainerId::new("GA-T003")),
        start_date: Some(date(2025, 3, 10)),
        end_date: Some(date(2025, 3, 14)),
        day_duration: Some(SlotSpan::Full),
        travel: 0.0,
        food_and_stay: 0.0,
    });
    // Second row, initially empty of dates.
    stores.rows.add(ScheduleRow {
        id: RowId::new("r2"),
        batch: BatchCode::new("BATCH-1"),
        trainer: Some(TrainerId::new("GA-T003")),
        start_date: Some(date(2025, 3, 17)),
        end_date: None,
        day_duration: Some(SlotSpan::Full),
        travel: 250.0,
        food_and_stay: 0.0,
    });

    // Completing the second row to Mon-Wed (18h) overshoots the budget
    // by 8h. The edit is accepted and the overshoot surfaced.
    let reckoning = manager
        .update_schedule_row(&RowId::new("r2"), RowEdit::EndDate(Some(date(2025, 3, 19))))
        .await
        .unwrap();

    assert_eq!(reckoning.session_hours, 18);
    assert_eq!(reckoning.budget.scheduled_hours, 48);
    assert_eq!(reckoning.budget.remaining, -8);
    assert_eq!(reckoning.budget.displayed_remaining, 0);
    assert!(reckoning.budget.is_over_allocated());
    assert_eq!(reckoning.cost, 6000.0);
    assert_eq!(reckoning.total_amount, 6250.0);

    // The row really was persisted with the new end date.
    let saved = stores.rows.get_row(&RowId::new("r2")).await.unwrap();
    assert_eq!(saved.end_date, Some(date(2025, 3, 19)));
}

#[tokio::test]
async fn row_edit_for_an_unknown_row_or_batch_fails() {
    let (manager, stores) = setup();

    let err = manager.update_schedule_row(&RowId::new("ghost"), RowEdit::Travel(10.0)).await.unwrap_err();
    assert!(matches!(err, Error::RowNotFound(_)));

    // Row exists but its batch does not resolve.
    stores.rows.add(ScheduleRow {
        id: RowId::new("r9"),
        batch: BatchCode::new("NO-SUCH-BATCH"),
        trainer: None,
        start_date: None,
        end_date: None,
        day_duration: None,
        travel: 0.0,
        food_and_stay: 0.0,
    });
    let err = manager.update_schedule_row(&RowId::new("r9"), RowEdit::Travel(10.0)).await.unwrap_err();
    assert!(matches!(err, Error::BatchNotFound(_)));
}

#[tokio::test]
async fn free_slot_lookup_checks_the_trainer_and_skips_booked_halves() {
    let (manager, _stores) = setup();

    manager.create_booking(new_booking("GA-T003", date(2025, 6, 2), SlotSpan::Am)).await.unwrap();

    let slots = manager.free_slots(&TrainerId::new("GA-T003"), date(2025, 6, 1), 2, 90).await.unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!((slots[0].date, slots[0].slot), (date(2025, 6, 2), Slot::Pm));
    assert_eq!((slots[1].date, slots[1].slot), (date(2025, 6, 3), Slot::Am));

    let err = manager.free_slots(&TrainerId::new("GA-T999"), date(2025, 6, 1), 2, 90).await.unwrap_err();
    assert!(matches!(err, Error::TrainerNotFound(_)));
}
