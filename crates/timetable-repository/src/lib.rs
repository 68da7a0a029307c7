//! # Timetable Repository
//!
//! Data access for student groups and their schedules.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn GroupRepository> / Arc<dyn ScheduleRepository>
//! MySqlGroupRepository / MySqlScheduleRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! Groups are always returned with their schedules loaded.

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
