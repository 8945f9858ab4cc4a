use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    DeletedFoodResponse, FoodListResponse, FoodRequest, LoggedFoodResponse, SummaryResponse,
};
use super::repo_types::NewFood;
use super::services::{delete_food, log_food, today_with_foods};
use crate::error::AppError;
use crate::state::AppState;

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:food_id", delete(remove_food))
        .route("/summary", get(summary))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    Json(body): Json<FoodRequest>,
) -> Result<(StatusCode, Json<LoggedFoodResponse>), AppError> {
    let food = NewFood::try_from(body)?;
    let (item, change) = log_food(&state, food).await?;

    Ok((
        StatusCode::CREATED,
        Json(LoggedFoodResponse {
            food_id: item.id,
            protein: change.total.protein,
            carbs: change.total.carbs,
            fats: change.total.fats,
            calories: change.total.calories,
            previous_deficit: change.previous_deficit,
            deficit_delta: change.deficit - change.previous_deficit,
            deficit: change.deficit,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> Result<Json<FoodListResponse>, AppError> {
    let (_, foods) = today_with_foods(&state).await?;
    Ok(Json(FoodListResponse { foods }))
}

#[instrument(skip(state))]
pub async fn remove_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> Result<Json<DeletedFoodResponse>, AppError> {
    let (item, change) = delete_food(&state, &food_id).await?;
    Ok(Json(DeletedFoodResponse {
        food_id: item.id,
        protein: change.total.protein,
        carbs: change.total.carbs,
        fats: change.total.fats,
        calories: change.total.calories,
        removed_calories: item.macros.calories,
        previous_deficit: change.previous_deficit,
        deficit: change.deficit,
    }))
}

#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let (day, foods) = today_with_foods(&state).await?;
    Ok(Json(SummaryResponse {
        day: day.day,
        protein: day.macros.protein,
        carbs: day.macros.carbs,
        fats: day.macros.fats,
        calories: day.macros.calories,
        deficit: day.deficit,
        foods,
    }))
}

#[cfg(test)]
mod tests {
    use crate::testing::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use time::macros::date;

    fn yogurt() -> serde_json::Value {
        json!({
            "name": "Greek yogurt",
            "protein": 17, "carbs": 6, "fats": 1, "calories": 200,
            "servingSize": 170, "servingUnit": "g"
        })
    }

    #[tokio::test]
    async fn create_list_and_summarize() {
        let app = TestApp::new(date!(2024 - 03 - 07));

        let (status, created) = send(&app, Method::POST, "/api/foods", Some(yogurt())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["calories"], json!(200.0));
        assert_eq!(created["deficitDelta"], json!(-200.0));
        assert_eq!(created["deficit"], json!(1600.0));

        let (_, list) = send(&app, Method::GET, "/api/foods", None).await;
        assert_eq!(list["foods"].as_array().unwrap().len(), 1);
        assert_eq!(list["foods"][0]["name"], json!("Greek yogurt"));
        assert_eq!(list["foods"][0]["servingUnit"], json!("g"));
        assert_eq!(list["foods"][0]["id"], created["foodId"]);

        let (_, summary) = send(&app, Method::GET, "/api/summary", None).await;
        assert_eq!(summary["day"], json!("2024 / 03 / 07"));
        assert_eq!(summary["calories"], json!(200.0));
        assert_eq!(summary["foods"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_brings_totals_back_down() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        send(
            &app,
            Method::POST,
            "/api/nutrition",
            Some(json!({ "protein": 0, "carbs": 0, "fats": 0, "calories": 300 })),
        )
        .await;
        let (_, created) = send(&app, Method::POST, "/api/foods", Some(yogurt())).await;
        let id = created["foodId"].as_str().unwrap().to_string();

        let (status, deleted) = send(&app, Method::DELETE, &format!("/api/foods/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["calories"], json!(300.0));
        assert_eq!(deleted["removedCalories"], json!(200.0));
        assert_eq!(deleted["deficit"], json!(1500.0));

        let (status, _) = send(&app, Method::DELETE, &format!("/api/foods/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn nameless_food_is_rejected() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/foods",
            Some(json!({ "name": "  ", "protein": 1, "carbs": 1, "fats": 1, "calories": 10 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("name is required"));
        assert!(app.store.rows("foods").is_empty());
    }

    #[tokio::test]
    async fn empty_day_lists_no_foods() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (_, list) = send(&app, Method::GET, "/api/foods", None).await;
        assert_eq!(list["foods"], json!([]));
        let (_, summary) = send(&app, Method::GET, "/api/summary", None).await;
        assert_eq!(summary["calories"], json!(0.0));
    }
}
