use serde::{Deserialize, Serialize};

/// Wire representation of a trainer record.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrainerDto {
    pub trainer_id: String,
    pub name: String,
    /// "PerHour" or "PerDay"; anything else defaults to per-day.
    pub payment_type: String,
    pub rate: f64,
}
