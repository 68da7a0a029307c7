//! Decides whether a feed lesson occurs on a given calendar date.

use super::FeedLesson;
use chrono::{NaiveDate, Weekday};
use timetable_config::FEED_DATE_FORMAT;

/// Localized day name used as the feed's schedule key.
#[must_use]
pub const fn localized_day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Понедельник",
        Weekday::Tue => "Вторник",
        Weekday::Wed => "Среда",
        Weekday::Thu => "Четверг",
        Weekday::Fri => "Пятница",
        Weekday::Sat => "Суббота",
        Weekday::Sun => "Воскресенье",
    }
}

/// 1-based semester week containing `date`.
#[must_use]
pub fn week_number(date: NaiveDate, semester_start: NaiveDate) -> i64 {
    (date - semester_start).num_days().div_euclid(7) + 1
}

fn parse_feed_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, FEED_DATE_FORMAT)
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn check(
    lesson: &FeedLesson,
    target: NaiveDate,
    semester_start: NaiveDate,
) -> Result<bool, chrono::ParseError> {
    if let Some(weeks) = lesson.week_number.as_ref().filter(|w| !w.is_empty()) {
        if !weeks.contains(&week_number(target, semester_start)) {
            return Ok(false);
        }
    }

    if let Some(date) = non_empty(lesson.date_lesson.as_ref()) {
        return Ok(parse_feed_date(date)? == target);
    }

    if let (Some(start), Some(end)) = (
        non_empty(lesson.start_lesson_date.as_ref()),
        non_empty(lesson.end_lesson_date.as_ref()),
    ) {
        let start = parse_feed_date(start)?;
        let end = parse_feed_date(end)?;
        return Ok(start <= target && target <= end);
    }

    Ok(true)
}

/// Returns true if the lesson applies on `target`.
///
/// Rules, in order: the week set must contain the target week; a one-off
/// `dateLesson` must equal the target; a start/end range must contain it.
/// A lesson with none of these applies every week. Unparseable dates make
/// the lesson applicable.
#[must_use]
pub fn lesson_applies(lesson: &FeedLesson, target: NaiveDate, semester_start: NaiveDate) -> bool {
    check(lesson, target, semester_start).unwrap_or(true)
}
