//! External schedule feed: the HTTP client, the feed payload and the lesson
//! applicability filter.

pub mod applicability;
mod client;
mod feed;

pub use client::{BsuirScheduleClient, BsuirScheduleClientParameters, ScheduleFeedClient, FEED_SERVICE_NAME};
pub use feed::{FeedLesson, ScheduleFeed};
