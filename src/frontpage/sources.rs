use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Activity, Member, NewsItem, Photo, Poll, PollOption, Tag};

#[derive(Debug)]
pub enum SourceError {
    /// The lookup matched nothing. Callers decide whether that is fatal.
    NoResult,
    Backend(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::NoResult => write!(f, "No result"),
            SourceError::Backend(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<sqlx::Error> for SourceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => SourceError::NoResult,
            other => SourceError::Backend(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollDetails {
    pub options: Vec<PollOption>,
    pub total_votes: i64,
}

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Members whose birthday falls on `today`.
    async fn birthday_members(&self, today: NaiveDate) -> Result<Vec<Member>, SourceError>;
}

#[async_trait]
pub trait TagMapper: Send + Sync {
    /// The most recent tag of whichever of `members` is tagged most often.
    async fn most_active_member_tag(&self, members: &[Member]) -> Result<Option<Tag>, SourceError>;
}

#[async_trait]
pub trait ActivityMapper: Send + Sync {
    /// The `count` soonest upcoming activities, latest first.
    async fn upcoming_activities(&self, count: usize) -> Result<Vec<Activity>, SourceError>;
}

#[async_trait]
pub trait PhotoService: Send + Sync {
    async fn current_photo_of_the_week(&self) -> Result<Option<Photo>, SourceError>;
}

#[async_trait]
pub trait PollService: Send + Sync {
    async fn newest_poll(&self) -> Result<Option<Poll>, SourceError>;
    async fn poll_details(&self, poll: &Poll) -> Result<PollDetails, SourceError>;
}

#[async_trait]
pub trait NewsService: Send + Sync {
    /// The `count` most recent news items.
    async fn latest_news_items(&self, count: usize) -> Result<Vec<NewsItem>, SourceError>;
}
