use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Activity, NewsItem};

/// Anything that can be placed on the front page timeline.
pub trait Timestamped {
    fn display_time(&self) -> DateTime<Utc>;

    /// Absolute distance to `now` in milliseconds.
    fn distance_from(&self, now: DateTime<Utc>) -> u64 {
        self.display_time()
            .signed_duration_since(now)
            .num_milliseconds()
            .unsigned_abs()
    }
}

impl Timestamped for Activity {
    fn display_time(&self) -> DateTime<Utc> {
        self.begin_time
    }
}

impl Timestamped for NewsItem {
    fn display_time(&self) -> DateTime<Utc> {
        self.date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedItem {
    Activity(Activity),
    News(NewsItem),
}

impl Timestamped for FeedItem {
    fn display_time(&self) -> DateTime<Utc> {
        match self {
            FeedItem::Activity(activity) => activity.display_time(),
            FeedItem::News(item) => item.display_time(),
        }
    }
}

/// Interleave activities and news by closeness to `now` and keep the first `count`.
/// Equal distances keep activities-then-news input order.
pub fn merge_by_proximity(
    activities: Vec<Activity>,
    news: Vec<NewsItem>,
    now: DateTime<Utc>,
    count: usize,
) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = activities
        .into_iter()
        .map(FeedItem::Activity)
        .chain(news.into_iter().map(FeedItem::News))
        .collect();

    items.sort_by_key(|item| item.distance_from(now));
    items.truncate(count);
    items
}
