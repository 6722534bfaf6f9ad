use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Photo {
    pub id: i32,
    pub path: String,
    pub week: NaiveDate,
}
