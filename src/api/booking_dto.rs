use serde::{Deserialize, Serialize};

/// Wire representation of one booking.
///
/// `date` is a `YYYY-MM-DD` string; `slot_span` is "AM", "PM" or
/// "AM&PM". An unrecognized span is accepted and treated as a full day
/// by the domain mapping.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BookingDto {
    pub id: String,
    pub trainer_id: String,
    pub date: String,
    pub slot_span: String,
    pub batch_code: Option<String>,
    pub college_name: Option<String>,
    pub domain: Option<String>,
}
