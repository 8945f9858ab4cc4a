use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use super::dto::{DeficitsResponse, HistoryQuery, HistoryResponse, WeekQuery, WeeksResponse};
use super::services::{summarize_week, tracker, weekly_deficit, DayPoint, Tracker, WeekSummary};
use crate::days::reader::LOOKBACK_DAYS;
use crate::days::repo::{week_days, week_tags};
use crate::days::DailySnapshot;
use crate::error::AppError;
use crate::state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/weeks", get(list_weeks))
        .route("/deficits", get(get_deficits))
        .route("/tracker", get(get_tracker))
        .route("/week", get(get_week))
        .route("/history", get(get_history))
}

#[instrument(skip(state))]
pub async fn list_weeks(State(state): State<AppState>) -> Result<Json<WeeksResponse>, AppError> {
    let weeks = week_tags(&state).await?;
    Ok(Json(WeeksResponse { weeks }))
}

#[instrument(skip(state))]
pub async fn get_deficits(
    State(state): State<AppState>,
    Query(q): Query<WeekQuery>,
) -> Result<Json<DeficitsResponse>, AppError> {
    let week = q.tag()?;
    let snap = DailySnapshot::load(&state).await?;
    let days = week_days(&state, &week).await?;
    Ok(Json(DeficitsResponse {
        daily_deficit: snap.current().deficit,
        weekly_deficit: weekly_deficit(&days),
    }))
}

#[instrument(skip(state))]
pub async fn get_tracker(State(state): State<AppState>) -> Result<Json<Tracker>, AppError> {
    let snap = DailySnapshot::load(&state).await?;
    let week_records = match snap.current().week.first() {
        Some(tag) => week_days(&state, tag).await?,
        None => Vec::new(),
    };
    Ok(Json(tracker(&snap, &week_records)))
}

#[instrument(skip(state))]
pub async fn get_week(
    State(state): State<AppState>,
    Query(q): Query<WeekQuery>,
) -> Result<Json<WeekSummary>, AppError> {
    let week = q.tag()?;
    let days = week_days(&state, &week).await?;
    debug!(week = %week, days = days.len(), "week loaded");
    Ok(Json(summarize_week(&week, &days)))
}

#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let count = q.days(LOOKBACK_DAYS)?;
    let snap = DailySnapshot::load(&state).await?;
    let days = snap.last_days(count).iter().map(DayPoint::from).collect();
    Ok(Json(HistoryResponse { days }))
}
