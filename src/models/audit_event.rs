use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One recorded change to companies, packets or jobs.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AuditEvent {
    pub id: Uuid,
    /// `admin` or `sweeper`.
    pub actor: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
