use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Member {
    pub lidnr: i32,
    pub full_name: String,
    pub email: String,
    pub birth: NaiveDate,
}
