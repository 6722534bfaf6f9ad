use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Poll {
    pub id: i32,
    pub question: String,
    pub expiry_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct PollOption {
    pub id: i32,
    pub poll_id: i32,
    pub text: String,
    pub votes: i64,
}
