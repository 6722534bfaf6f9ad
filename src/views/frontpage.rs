use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::frontpage::{FeedItem, HomePage};
use crate::state::SharedState;

struct BirthdayRow {
    name: String,
    age: u32,
}

struct ActivityRow {
    name: String,
    location: String,
    when: String,
}

struct FeedRow {
    kind: &'static str,
    title: String,
    when: String,
}

struct PollRow {
    text: String,
    votes: i64,
}

#[derive(Template)]
#[template(path = "frontpage/index.html")]
struct IndexTemplate {
    birthdays: Vec<BirthdayRow>,
    activities: Vec<ActivityRow>,
    photo_path: Option<String>,
    poll_question: Option<String>,
    poll_options: Vec<PollRow>,
    poll_total: i64,
    feed: Vec<FeedRow>,
}

fn when(time: DateTime<Utc>) -> String {
    time.format("%a %e %b %Y, %H:%M").to_string()
}

impl From<HomePage> for IndexTemplate {
    fn from(page: HomePage) -> Self {
        let (poll_question, poll_options, poll_total) = match page.poll {
            Some(summary) => (
                Some(summary.poll.question),
                summary
                    .details
                    .options
                    .into_iter()
                    .map(|o| PollRow {
                        text: o.text,
                        votes: o.votes,
                    })
                    .collect(),
                summary.details.total_votes,
            ),
            None => (None, Vec::new(), 0),
        };

        IndexTemplate {
            birthdays: page
                .birthdays
                .into_iter()
                .map(|b| BirthdayRow {
                    name: b.member.full_name,
                    age: b.age,
                })
                .collect(),
            activities: page
                .activities
                .into_iter()
                .map(|a| ActivityRow {
                    when: when(a.begin_time),
                    name: a.name,
                    location: a.location,
                })
                .collect(),
            photo_path: page.weekly_photo.map(|p| p.path),
            poll_question,
            poll_options,
            poll_total,
            feed: page
                .news
                .into_iter()
                .map(|item| match item {
                    FeedItem::Activity(a) => FeedRow {
                        kind: "activity",
                        when: when(a.begin_time),
                        title: a.name,
                    },
                    FeedItem::News(n) => FeedRow {
                        kind: "news",
                        when: when(n.date),
                        title: n.title,
                    },
                })
                .collect(),
        }
    }
}

pub async fn index(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let page = state.frontpage.home_page_data(Utc::now()).await?;
    let template = IndexTemplate::from(page);
    Ok(Html(template.render().unwrap_or_default()))
}
