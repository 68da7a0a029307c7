//! MySQL repository implementations.

mod group_repository;
mod schedule_repository;

pub use group_repository::MySqlGroupRepository;
pub use schedule_repository::MySqlScheduleRepository;
