use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use tokio::sync::watch;

use crate::db;
use crate::middleware::audit::{self, Actor};
use crate::state::SharedState;

/// Unpublish every published packet that has expired at `now`.
/// Returns how many packets changed.
pub async fn sweep_expired(pool: &PgPool, now: DateTime<Utc>) -> Result<usize, sqlx::Error> {
    let expired = db::packets::unpublish_expired(pool, now).await?;

    for packet in &expired {
        audit::log_event(
            pool,
            Actor::Sweeper,
            "packet.expired",
            "packet",
            Some(packet.id),
            Some(json!({ "company_id": packet.company_id, "expires": packet.expires })),
        )
        .await;
    }

    Ok(expired.len())
}

/// Periodically sweep expired packets until shutdown is signaled.
pub async fn run(state: SharedState, mut shutdown: watch::Receiver<bool>) {
    let interval = std::time::Duration::from_secs(state.config.packet_sweep_secs);
    tracing::info!("Packet sweeper started (every {}s)", interval.as_secs());

    loop {
        if *shutdown.borrow() {
            break;
        }

        match sweep_expired(&state.pool, Utc::now()).await {
            Ok(0) => {}
            Ok(n) => tracing::info!("Unpublished {n} expired packets"),
            Err(e) => tracing::error!("Packet sweep failed: {e}"),
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.changed() => {}
        }
    }

    tracing::info!("Packet sweeper stopped");
}
