use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{CaloriesResponse, NutritionRequest, NutritionResponse};
use super::services::add_macros;
use crate::days::{upsert_today, DailySnapshot};
use crate::error::AppError;
use crate::state::AppState;

pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition", post(log_nutrition))
        .route("/calories", get(get_calories))
}

#[instrument(skip(state, body))]
pub async fn log_nutrition(
    State(state): State<AppState>,
    Json(body): Json<NutritionRequest>,
) -> Result<Json<NutritionResponse>, AppError> {
    let delta = body.macros()?;
    let up = upsert_today(&state, |rec| Ok(add_macros(rec, delta))).await?;

    info!(day = %up.record.day, calories = delta.calories, "nutrition logged");
    Ok(Json(up.outcome.into()))
}

#[instrument(skip(state))]
pub async fn get_calories(
    State(state): State<AppState>,
) -> Result<Json<CaloriesResponse>, AppError> {
    let snap = DailySnapshot::load(&state).await?;
    Ok(Json(CaloriesResponse {
        daily_cal: snap.current().macros.calories,
    }))
}

#[cfg(test)]
mod tests {
    use crate::testing::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use time::macros::date;

    #[tokio::test]
    async fn first_log_sets_totals_and_deficit() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/nutrition",
            Some(json!({ "protein": 30, "carbs": 50, "fats": 12, "calories": 450 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["calories"], json!(450.0));
        assert_eq!(body["protein"], json!(30.0));
        assert_eq!(body["carbs"], json!(50.0));
        assert_eq!(body["fats"], json!(12.0));
        assert_eq!(body["deficit"], json!(1350.0));
        assert_eq!(body["previousCalories"], json!(0.0));
    }

    #[tokio::test]
    async fn same_post_twice_counts_twice() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let payload = json!({ "protein": 10, "carbs": 20, "fats": 5, "calories": 200 });
        send(&app, Method::POST, "/api/nutrition", Some(payload.clone())).await;
        let (_, body) = send(&app, Method::POST, "/api/nutrition", Some(payload)).await;

        assert_eq!(body["previousCalories"], json!(200.0));
        assert_eq!(body["addedCalories"], json!(200.0));
        assert_eq!(body["calories"], json!(400.0));
        assert_eq!(body["protein"], json!(20.0));
        assert_eq!(body["deficit"], json!(1400.0));

        let (_, cal) = send(&app, Method::GET, "/api/calories", None).await;
        assert_eq!(cal["dailyCal"], json!(400.0));
    }

    #[tokio::test]
    async fn missing_field_is_rejected_before_any_write() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/nutrition",
            Some(json!({ "protein": 10, "carbs": 20, "fats": 5 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("calories is required"));
        assert!(app.store.rows("daily").is_empty());
    }

    #[tokio::test]
    async fn calories_default_to_zero_without_a_record() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, body) = send(&app, Method::GET, "/api/calories", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dailyCal"], json!(0.0));
    }
}
