use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::error::AppError;
use crate::frontpage::{FeedItem, HomePage};
use crate::state::SharedState;

pub async fn home(State(state): State<SharedState>) -> Result<Json<HomePage>, AppError> {
    let page = state.frontpage.home_page_data(Utc::now()).await?;
    Ok(Json(page))
}

pub async fn news(State(state): State<SharedState>) -> Result<Json<Vec<FeedItem>>, AppError> {
    let items = state.frontpage.news_items(Utc::now()).await?;
    Ok(Json(items))
}
