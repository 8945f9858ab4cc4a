use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use super::dto::{WeightLoggedResponse, WeightRequest, WeightResponse};
use super::services::{record_weigh_in, weight_trend, WeighIn};
use crate::days::{upsert_today, DailySnapshot};
use crate::error::AppError;
use crate::state::AppState;

pub fn weight_routes() -> Router<AppState> {
    Router::new().route("/weight", get(get_weight).post(log_weight))
}

#[instrument(skip(state, body))]
pub async fn log_weight(
    State(state): State<AppState>,
    Json(body): Json<WeightRequest>,
) -> Result<Json<WeightLoggedResponse>, AppError> {
    let weigh_in = WeighIn::try_from(body)?;
    let up = upsert_today(&state, |rec| Ok(record_weigh_in(rec, weigh_in))).await?;

    info!(day = %up.record.day, weight = weigh_in.weight, "weight logged");
    let rec = up.record;
    Ok(Json(WeightLoggedResponse {
        previous_weight: up.outcome,
        weight: weigh_in.weight,
        bloated: rec.bloated,
        poop: rec.poop,
        watery: rec.watery,
        bad_sleep: rec.bad_sleep,
    }))
}

#[instrument(skip(state))]
pub async fn get_weight(State(state): State<AppState>) -> Result<Json<WeightResponse>, AppError> {
    let snap = DailySnapshot::load(&state).await?;
    let (weight, previous_weight, change) = weight_trend(&snap);
    Ok(Json(WeightResponse {
        weight,
        previous_weight,
        change,
    }))
}
