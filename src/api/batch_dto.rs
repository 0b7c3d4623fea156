use serde::{Deserialize, Serialize};

/// Wire representation of a training batch.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BatchDto {
    pub batch_code: String,
    pub assigned_hours: u32,
}

/// Wire representation of one schedule row of a batch. Rows are filled
/// in field by field, so everything beyond identity is optional.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScheduleRowDto {
    pub id: String,
    pub batch_code: String,
    pub trainer_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub day_duration: Option<String>,
    pub travel: Option<f64>,
    pub food_and_stay: Option<f64>,
}
