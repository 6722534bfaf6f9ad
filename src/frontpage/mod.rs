//! Front page aggregation over independent collaborator services.

pub mod feed;
pub mod sources;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{Activity, Member, Photo, Poll, Tag};

pub use feed::{merge_by_proximity, FeedItem, Timestamped};
pub use sources::{
    ActivityMapper, MemberDirectory, NewsService, PhotoService, PollDetails, PollService,
    SourceError, TagMapper,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontpageConfig {
    pub news_count: usize,
    pub activity_count: usize,
}

/// The collaborators the front page is composed from.
#[derive(Clone)]
pub struct FrontpageSources {
    pub members: Arc<dyn MemberDirectory>,
    pub tags: Arc<dyn TagMapper>,
    pub activities: Arc<dyn ActivityMapper>,
    pub photos: Arc<dyn PhotoService>,
    pub polls: Arc<dyn PollService>,
    pub news: Arc<dyn NewsService>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Birthday {
    pub member: Member,
    pub age: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BirthdayInfo {
    pub birthdays: Vec<Birthday>,
    pub tag: Option<Tag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollSummary {
    #[serde(flatten)]
    pub details: PollDetails,
    pub poll: Poll,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub birthdays: Vec<Birthday>,
    pub birthday_tag: Option<Tag>,
    pub activities: Vec<Activity>,
    pub weekly_photo: Option<Photo>,
    pub poll: Option<PollSummary>,
    pub news: Vec<FeedItem>,
}

/// Whole years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(birth).unwrap_or(0)
}

pub struct Frontpage {
    sources: FrontpageSources,
    config: FrontpageConfig,
}

impl Frontpage {
    pub fn new(sources: FrontpageSources, config: FrontpageConfig) -> Self {
        Self { sources, config }
    }

    pub fn config(&self) -> FrontpageConfig {
        self.config
    }

    pub async fn home_page_data(&self, now: DateTime<Utc>) -> Result<HomePage, SourceError> {
        let birthday_info = self.birthday_info(now.date_naive()).await?;
        let activities = self.upcoming_activities().await?;
        let weekly_photo = self.sources.photos.current_photo_of_the_week().await?;
        let poll = self.poll_summary().await?;
        let news = self.merge_news(activities.clone(), now).await?;

        Ok(HomePage {
            birthdays: birthday_info.birthdays,
            birthday_tag: birthday_info.tag,
            activities,
            weekly_photo,
            poll,
            news,
        })
    }

    pub async fn birthday_info(&self, today: NaiveDate) -> Result<BirthdayInfo, SourceError> {
        let members = self.sources.members.birthday_members(today).await?;

        let birthdays = members
            .iter()
            .map(|member| Birthday {
                member: member.clone(),
                age: age_on(member.birth, today),
            })
            .collect();

        let tag = match self.sources.tags.most_active_member_tag(&members).await {
            Ok(tag) => tag,
            Err(SourceError::NoResult) => {
                tracing::debug!("No tag found for birthday members");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(BirthdayInfo { birthdays, tag })
    }

    /// Activities and news interleaved by closeness to `now`.
    pub async fn news_items(&self, now: DateTime<Utc>) -> Result<Vec<FeedItem>, SourceError> {
        let activities = self.upcoming_activities().await?;
        self.merge_news(activities, now).await
    }

    /// The soonest activities in chronological order.
    pub async fn upcoming_activities(&self) -> Result<Vec<Activity>, SourceError> {
        let mut activities = self
            .sources
            .activities
            .upcoming_activities(self.config.activity_count)
            .await?;
        activities.reverse();
        Ok(activities)
    }

    async fn merge_news(
        &self,
        activities: Vec<Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<FeedItem>, SourceError> {
        let count = self.config.news_count;
        let news = self.sources.news.latest_news_items(count).await?;
        Ok(merge_by_proximity(activities, news, now, count))
    }

    async fn poll_summary(&self) -> Result<Option<PollSummary>, SourceError> {
        let Some(poll) = self.sources.polls.newest_poll().await? else {
            return Ok(None);
        };
        let details = self.sources.polls.poll_details(&poll).await?;
        Ok(Some(PollSummary { details, poll }))
    }
}
