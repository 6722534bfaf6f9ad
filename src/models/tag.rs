use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub photo_id: i32,
    pub member_id: i32,
}
