use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub date: DateTime<Utc>,
}
