use serde::Serialize;
use std::io::Write;

use crate::domain::manager::ScheduleView;
use crate::error::Result;

/// One booking flattened for the export collaborators (CSV/PDF). The
/// engine only supplies the data; formatting beyond CSV cells is the
/// consumer's business.
#[derive(Serialize, Debug, Clone)]
pub struct BookingRecord {
    pub booking_id: String,
    pub trainer_id: String,
    pub date: String,
    pub slot_span: String,
    pub batch_code: String,
    pub college_name: String,
    pub domain: String,
    pub conflict: bool,
}

/// Per-trainer utilization flattened for export.
#[derive(Serialize, Debug, Clone)]
pub struct UtilizationRecord {
    pub trainer_id: String,
    pub month: String,
    pub utilization_percent: u8,
}

/// Flattens a computed view into booking rows, sorted by date then
/// trainer so exports are stable.
pub fn booking_records(view: &ScheduleView) -> Vec<BookingRecord> {
    let mut records: Vec<BookingRecord> = view
        .bookings
        .iter()
        .map(|entry| BookingRecord {
            booking_id: entry.booking.id.to_string(),
            trainer_id: entry.booking.trainer.to_string(),
            date: entry.booking.date.format("%Y-%m-%d").to_string(),
            slot_span: entry.booking.span.label().to_string(),
            batch_code: entry.booking.batch.as_ref().map(|c| c.to_string()).unwrap_or_default(),
            college_name: entry.booking.college_name.clone(),
            domain: entry.booking.domain.clone(),
            conflict: entry.conflict,
        })
        .collect();

    records.sort_by(|a, b| (&a.date, &a.trainer_id).cmp(&(&b.date, &b.trainer_id)));
    records
}

/// Flattens the view's utilization map, sorted by trainer id.
pub fn utilization_records(view: &ScheduleView) -> Vec<UtilizationRecord> {
    let month = format!("{}-{:02}", view.year, view.month);

    let mut records: Vec<UtilizationRecord> = view
        .utilization
        .iter()
        .map(|(trainer, percent)| UtilizationRecord {
            trainer_id: trainer.to_string(),
            month: month.clone(),
            utilization_percent: *percent,
        })
        .collect();

    records.sort_by(|a, b| a.trainer_id.cmp(&b.trainer_id));
    records
}

/// Writes serializable records as CSV with a header row.
pub fn write_csv<W: Write, R: Serialize>(writer: W, records: &[R]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
