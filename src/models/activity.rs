use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Activity {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub description: String,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
