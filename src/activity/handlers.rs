use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use super::dto::{BikeRequest, ExerciseRequest, StepsRequest};
use super::services::{log_exercise, log_steps, Exercise, ExerciseChange, StepsChange};
use crate::days::upsert_today;
use crate::error::{optional_amount, required_amount, AppError};
use crate::state::AppState;

pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/steps", post(add_steps))
        .route("/exercise", post(add_exercise))
        .route("/bike", post(add_ride))
}

#[instrument(skip(state, body))]
pub async fn add_steps(
    State(state): State<AppState>,
    Json(body): Json<StepsRequest>,
) -> Result<Json<StepsChange>, AppError> {
    let steps = required_amount("steps", body.steps)?;
    let burn = optional_amount("burn", body.burn)?;

    let up = upsert_today(&state, |rec| Ok(log_steps(rec, steps, burn))).await?;
    info!(day = %up.record.day, steps, burn, "steps logged");
    Ok(Json(up.outcome))
}

#[instrument(skip(state, body))]
pub async fn add_exercise(
    State(state): State<AppState>,
    Json(body): Json<ExerciseRequest>,
) -> Result<Json<ExerciseChange>, AppError> {
    let exercise = Exercise::try_from(body)?;
    record(&state, exercise).await
}

#[instrument(skip(state, body))]
pub async fn add_ride(
    State(state): State<AppState>,
    Json(body): Json<BikeRequest>,
) -> Result<Json<ExerciseChange>, AppError> {
    let ride = Exercise::try_from(body)?;
    record(&state, ride).await
}

async fn record(state: &AppState, exercise: Exercise) -> Result<Json<ExerciseChange>, AppError> {
    let up = upsert_today(state, move |rec| Ok(log_exercise(rec, exercise))).await?;
    info!(day = %up.record.day, kind = up.outcome.exercise_type, "exercise logged");
    Ok(Json(up.outcome))
}

#[cfg(test)]
mod tests {
    use crate::testing::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use time::macros::date;

    #[tokio::test]
    async fn steps_accumulate_and_widen_deficit() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        send(&app, Method::POST, "/api/steps", Some(json!({ "steps": 3000, "burn": 120 }))).await;
        let (status, body) =
            send(&app, Method::POST, "/api/steps", Some(json!({ "steps": 4500 }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["previousSteps"], json!(3000.0));
        assert_eq!(body["addedSteps"], json!(4500.0));
        assert_eq!(body["totalSteps"], json!(7500.0));
        assert_eq!(body["deficit"], json!(1920.0));
    }

    #[tokio::test]
    async fn exercise_variants_route_to_their_fields() {
        let app = TestApp::new(date!(2024 - 03 - 07));

        let (_, zone2) = send(
            &app,
            Method::POST,
            "/api/exercise",
            Some(json!({ "exerciseType": "zone2", "duration": 40, "distance": 6, "burn": 300 })),
        )
        .await;
        assert_eq!(zone2["exerciseType"], json!("zone2"));
        assert_eq!(zone2["totalDuration"], json!(40.0));
        assert_eq!(zone2["totalDistance"], json!(6.0));

        let (_, vo2) = send(
            &app,
            Method::POST,
            "/api/exercise",
            Some(json!({ "exerciseType": "vo2max", "vo2max": 47.5 })),
        )
        .await;
        assert_eq!(vo2["vo2max"], json!(47.5));
        assert!(vo2.get("totalDuration").is_none());

        let (_, gym) = send(
            &app,
            Method::POST,
            "/api/exercise",
            Some(json!({ "exerciseType": "gym", "duration": 55, "workoutType": "Pull", "burn": 200 })),
        )
        .await;
        assert_eq!(gym["workoutType"], json!("Pull"));
        assert_eq!(gym["totalBurn"], json!(500.0));
        assert_eq!(gym["deficit"], json!(2300.0));
    }

    #[tokio::test]
    async fn bike_requires_all_fields_and_accumulates() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, _) =
            send(&app, Method::POST, "/api/bike", Some(json!({ "duration": 30, "distance": 10 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let ride = json!({ "duration": 30, "distance": 10, "burn": 250 });
        send(&app, Method::POST, "/api/bike", Some(ride.clone())).await;
        let (_, body) = send(&app, Method::POST, "/api/bike", Some(ride)).await;
        assert_eq!(body["exerciseType"], json!("cycling"));
        assert_eq!(body["previousDuration"], json!(30.0));
        assert_eq!(body["totalDuration"], json!(60.0));
        assert_eq!(body["totalDistance"], json!(20.0));
        assert_eq!(body["deficit"], json!(2300.0));
    }

    #[tokio::test]
    async fn bad_exercise_requests_are_rejected() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/exercise",
            Some(json!({ "exerciseType": "swim", "duration": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        for payload in [
            json!({ "exerciseType": "zone2" }),
            json!({ "exerciseType": "vo2max", "duration": 20 }),
            json!({ "duration": 20 }),
            json!({ "exerciseType": "gym", "duration": 20, "burn": -5 }),
        ] {
            let (status, _) = send(&app, Method::POST, "/api/exercise", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
        assert!(app.store.rows("daily").is_empty());
    }
}
