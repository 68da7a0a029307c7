//! Data Transfer Objects (DTOs).

mod group_dto;
mod schedule_dto;

pub use group_dto::*;
pub use schedule_dto::*;
