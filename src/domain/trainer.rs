use crate::api::trainer_dto::TrainerDto;
use crate::domain::id::TrainerId;

/// How a trainer's rate is quoted. The rate field itself is a single
/// number either way; the mode only documents what it is quoted per.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    PerHour,
    PerDay,
}

impl PaymentMode {
    /// Unrecognized payment types default to per-day, the dominant mode
    /// in the source data.
    fn parse(raw: &str) -> PaymentMode {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PERHOUR" | "PER_HOUR" | "HOURLY" => PaymentMode::PerHour,
            "PERDAY" | "PER_DAY" | "DAILY" => PaymentMode::PerDay,
            other => {
                log::warn!("Unrecognized payment type '{}', assuming per-day", other);
                PaymentMode::PerDay
            }
        }
    }
}

/// A trainer as the engine sees one: identity plus billing inputs.
/// Created by an external onboarding flow; read-only here.
#[derive(Debug, Clone)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
    /// Billing rate per the payment mode (half-day sessions bill half).
    pub rate: f64,
    pub payment_mode: PaymentMode,
}

impl From<TrainerDto> for Trainer {
    fn from(dto: TrainerDto) -> Self {
        Trainer {
            id: TrainerId::new(dto.trainer_id),
            name: dto.name,
            rate: dto.rate,
            payment_mode: PaymentMode::parse(&dto.payment_type),
        }
    }
}
