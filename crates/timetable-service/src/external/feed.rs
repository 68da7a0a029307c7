//! Payload of the external schedule feed.

use serde::Deserialize;
use std::collections::HashMap;

/// Top-level feed document. Fields other than `schedules` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleFeed {
    /// Lessons keyed by localized weekday name.
    #[serde(default)]
    pub schedules: Option<HashMap<String, Vec<FeedLesson>>>,
}

impl ScheduleFeed {
    /// Returns true if the feed carries no day entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schedules.as_ref().map_or(true, HashMap::is_empty)
    }

    /// Lessons listed under a localized day name.
    #[must_use]
    pub fn lessons_on(&self, day: &str) -> &[FeedLesson] {
        self.schedules
            .as_ref()
            .and_then(|days| days.get(day))
            .map_or(&[], Vec::as_slice)
    }
}

/// One lesson record. Dates are `dd.MM.yyyy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedLesson {
    #[serde(default)]
    pub subject_full_name: Option<String>,
    #[serde(default)]
    pub lesson_type_abbrev: Option<String>,
    #[serde(default)]
    pub start_lesson_time: Option<String>,
    #[serde(default)]
    pub end_lesson_time: Option<String>,
    #[serde(default)]
    pub auditories: Option<Vec<String>>,
    #[serde(default)]
    pub start_lesson_date: Option<String>,
    #[serde(default)]
    pub end_lesson_date: Option<String>,
    #[serde(default)]
    pub date_lesson: Option<String>,
    #[serde(default)]
    pub week_number: Option<Vec<i64>>,
}

impl FeedLesson {
    /// `"<start>-<end>"` time range.
    #[must_use]
    pub fn time_range(&self) -> String {
        format!(
            "{}-{}",
            self.start_lesson_time.as_deref().unwrap_or_default(),
            self.end_lesson_time.as_deref().unwrap_or_default()
        )
    }

    /// First listed room, or an empty string.
    #[must_use]
    pub fn first_auditorium(&self) -> String {
        self.auditories
            .as_ref()
            .and_then(|rooms| rooms.first())
            .cloned()
            .unwrap_or_default()
    }
}
