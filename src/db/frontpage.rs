use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::frontpage::{
    ActivityMapper, MemberDirectory, NewsService, PhotoService, PollDetails, PollService,
    SourceError, TagMapper,
};
use crate::models::{Activity, Member, NewsItem, Photo, Poll, PollOption, Tag};

/// Postgres-backed front page collaborators.
#[derive(Clone)]
pub struct PgFrontpageSources {
    pool: PgPool,
}

impl PgFrontpageSources {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberDirectory for PgFrontpageSources {
    async fn birthday_members(&self, today: NaiveDate) -> Result<Vec<Member>, SourceError> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE to_char(birth, 'MM-DD') = $1 ORDER BY full_name ASC",
        )
        .bind(today.format("%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }
}

#[async_trait]
impl TagMapper for PgFrontpageSources {
    async fn most_active_member_tag(&self, members: &[Member]) -> Result<Option<Tag>, SourceError> {
        let ids: Vec<i32> = members.iter().map(|m| m.lidnr).collect();
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT t.* FROM tags t
             WHERE t.member_id = (
                SELECT member_id FROM tags WHERE member_id = ANY($1)
                GROUP BY member_id ORDER BY COUNT(*) DESC, member_id ASC LIMIT 1
             )
             ORDER BY t.id DESC LIMIT 1",
        )
        .bind(ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(Some(tag))
    }
}

#[async_trait]
impl ActivityMapper for PgFrontpageSources {
    async fn upcoming_activities(&self, count: usize) -> Result<Vec<Activity>, SourceError> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT * FROM (
                SELECT * FROM activities WHERE approved AND begin_time > now()
                ORDER BY begin_time ASC LIMIT $1
             ) upcoming ORDER BY begin_time DESC",
        )
        .bind(count as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(activities)
    }
}

#[async_trait]
impl PhotoService for PgFrontpageSources {
    async fn current_photo_of_the_week(&self) -> Result<Option<Photo>, SourceError> {
        let photo = sqlx::query_as::<_, Photo>(
            "SELECT p.id, p.path, w.week FROM weekly_photos w
             JOIN photos p ON p.id = w.photo_id
             WHERE w.week <= CURRENT_DATE
             ORDER BY w.week DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(photo)
    }
}

#[async_trait]
impl PollService for PgFrontpageSources {
    async fn newest_poll(&self) -> Result<Option<Poll>, SourceError> {
        let poll = sqlx::query_as::<_, Poll>(
            "SELECT id, question, expiry_date FROM polls WHERE approved
             ORDER BY expiry_date DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(poll)
    }

    async fn poll_details(&self, poll: &Poll) -> Result<PollDetails, SourceError> {
        let options = sqlx::query_as::<_, PollOption>(
            "SELECT * FROM poll_options WHERE poll_id = $1 ORDER BY id ASC",
        )
        .bind(poll.id)
        .fetch_all(&self.pool)
        .await?;
        let total_votes = options.iter().map(|o| o.votes).sum();
        Ok(PollDetails {
            options,
            total_votes,
        })
    }
}

#[async_trait]
impl NewsService for PgFrontpageSources {
    async fn latest_news_items(&self, count: usize) -> Result<Vec<NewsItem>, SourceError> {
        let items = sqlx::query_as::<_, NewsItem>(
            "SELECT * FROM news_items ORDER BY pinned DESC, date DESC LIMIT $1",
        )
        .bind(count as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
