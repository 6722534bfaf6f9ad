pub mod auth;
pub mod company;
pub mod config;
pub mod db;
pub mod education;
pub mod email;
pub mod error;
pub mod form;
pub mod frontpage;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod views;
pub mod worker;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::frontpage::PgFrontpageSources;
use crate::email::{CompanyEmail, SmtpMailer};
use crate::frontpage::{Frontpage, FrontpageSources};
use crate::middleware::auth_redirect::admin_login_hint;
use crate::state::{AppState, SharedState};

/// Wire the Postgres-backed collaborators and mailer into shared state.
pub fn build_state(pool: PgPool, config: Config) -> SharedState {
    let sources = Arc::new(PgFrontpageSources::new(pool.clone()));
    let frontpage = Frontpage::new(
        FrontpageSources {
            members: sources.clone(),
            tags: sources.clone(),
            activities: sources.clone(),
            photos: sources.clone(),
            polls: sources.clone(),
            news: sources,
        },
        config.frontpage,
    );

    let company_email = config.smtp.as_ref().and_then(|smtp| {
        match SmtpMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("SMTP configured");
                Some(Arc::new(CompanyEmail::new(
                    Arc::new(mailer),
                    config.base_url.clone(),
                )))
            }
            Err(e) => {
                tracing::warn!("SMTP not available: {e}");
                None
            }
        }
    });

    Arc::new(AppState {
        pool,
        config,
        frontpage,
        company_email,
    })
}

pub fn router(state: SharedState) -> Router {
    let max_body_size = state.config.max_body_size;

    Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .merge(views::admin_view_routes().layer(axum::middleware::from_fn(admin_login_hint)))
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

pub fn build_app(pool: PgPool, config: Config) -> (Router, SharedState) {
    let state = build_state(pool, config);
    (router(state.clone()), state)
}

async fn health() -> &'static str {
    "ok"
}
