pub mod batch_dto;
pub mod booking_dto;
pub mod snapshot_dto;
pub mod trainer_dto;
