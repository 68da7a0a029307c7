//! Result type aliases for the timetable service.

use crate::TimetableError;

/// A specialized `Result` type for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;
