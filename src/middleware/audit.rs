use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Who caused an audited change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// A request carrying the admin token.
    Admin,
    /// The background packet sweeper.
    Sweeper,
}

impl Actor {
    pub fn as_str(self) -> &'static str {
        match self {
            Actor::Admin => "admin",
            Actor::Sweeper => "sweeper",
        }
    }
}

/// Record a mutation. Failures are logged and never fail the caller.
pub async fn log_event(
    pool: &PgPool,
    actor: Actor,
    action: &str,
    resource_type: &str,
    resource_id: Option<Uuid>,
    details: Option<Value>,
) {
    let result = crate::db::audit::log_event(
        pool,
        actor.as_str(),
        action,
        resource_type,
        resource_id,
        details,
    )
    .await;

    if let Err(e) = result {
        tracing::error!(actor = actor.as_str(), action, "Failed to log audit event: {e}");
    }
}
