use chrono::NaiveDate;

use crate::api::booking_dto::BookingDto;
use crate::domain::id::{BatchCode, BookingId, TrainerId};
use crate::domain::parse_wire_date;
use crate::domain::slot::SlotSpan;
use crate::error::Error;

/// One trainer committed to one date for one or both half-day slots.
///
/// The `conflict` flag is deliberately not part of this struct: it is a
/// derived value, recomputed from a snapshot by the conflict index and
/// carried by [`AnnotatedBooking`].
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: BookingId,
    pub trainer: TrainerId,
    pub date: NaiveDate,
    pub span: SlotSpan,
    /// Absent for ad-hoc quick bookings.
    pub batch: Option<BatchCode>,
    pub college_name: String,
    pub domain: String,
}

/// A proposed booking, before storage has assigned an id.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub trainer: TrainerId,
    pub date: NaiveDate,
    pub span: SlotSpan,
    pub batch: Option<BatchCode>,
    pub college_name: String,
    pub domain: String,
}

impl NewBooking {
    pub fn into_booking(self, id: BookingId) -> Booking {
        Booking {
            id,
            trainer: self.trainer,
            date: self.date,
            span: self.span,
            batch: self.batch,
            college_name: self.college_name,
            domain: self.domain,
        }
    }
}

/// A booking paired with its computed conflict flag, the shape handed
/// to display and export consumers.
#[derive(Debug, Clone)]
pub struct AnnotatedBooking {
    pub booking: Booking,
    pub conflict: bool,
}

impl TryFrom<BookingDto> for Booking {
    type Error = Error;

    fn try_from(dto: BookingDto) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: BookingId::new(dto.id),
            trainer: TrainerId::new(dto.trainer_id),
            date: parse_wire_date(&dto.date)?,
            span: SlotSpan::parse(&dto.slot_span),
            batch: dto.batch_code.map(BatchCode::new),
            college_name: dto.college_name.unwrap_or_default(),
            domain: dto.domain.unwrap_or_default(),
        })
    }
}
