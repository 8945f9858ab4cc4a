use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use super::dto::{SleepRequest, SleepResponse};
use super::services::{record_sleep, SleepLog};
use crate::days::{upsert_today, DailySnapshot};
use crate::error::AppError;
use crate::state::AppState;

pub fn sleep_routes() -> Router<AppState> {
    Router::new().route("/sleep", get(get_sleep).post(log_sleep))
}

#[instrument(skip(state, body))]
pub async fn log_sleep(
    State(state): State<AppState>,
    Json(body): Json<SleepRequest>,
) -> Result<Json<SleepResponse>, AppError> {
    let log = SleepLog::try_from(body)?;
    let up = upsert_today(&state, move |rec| {
        record_sleep(rec, log);
        Ok(())
    })
    .await?;

    info!(day = %up.record.day, "sleep logged");
    Ok(Json(SleepResponse::from(&up.record)))
}

#[instrument(skip(state))]
pub async fn get_sleep(State(state): State<AppState>) -> Result<Json<SleepResponse>, AppError> {
    let snap = DailySnapshot::load(&state).await?;
    Ok(Json(SleepResponse::from(&snap.current())))
}

#[cfg(test)]
mod tests {
    use crate::testing::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use time::macros::date;

    #[tokio::test]
    async fn timing_then_quality_are_both_kept() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, timing) = send(
            &app,
            Method::POST,
            "/api/sleep",
            Some(json!({ "sleepType": "timing", "bedTime": "23:15", "wakeTime": "06:45" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(timing["sleepWindow"], json!("23:15 - 06:45"));
        assert_eq!(timing["hours"], json!(7.5));

        send(
            &app,
            Method::POST,
            "/api/sleep",
            Some(json!({ "sleepType": "duration", "sleepQuality": "7-9 hours" })),
        )
        .await;

        let (_, body) = send(&app, Method::GET, "/api/sleep", None).await;
        assert_eq!(body["sleepQuality"], json!("7-9 hours"));
        assert_eq!(body["bedTime"], json!("23:15"));
        assert_eq!(body["wakeTime"], json!("06:45"));
    }

    #[tokio::test]
    async fn invalid_sleep_requests_are_rejected() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, _) =
            send(&app, Method::POST, "/api/sleep", Some(json!({ "sleepType": "nap" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        for payload in [
            json!({}),
            json!({ "sleepType": "duration" }),
            json!({ "sleepType": "timing", "bedTime": "23:00" }),
            json!({ "sleepType": "timing", "bedTime": "11pm", "wakeTime": "07:00" }),
        ] {
            let (status, _) = send(&app, Method::POST, "/api/sleep", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn empty_day_reads_nulls() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (_, body) = send(&app, Method::GET, "/api/sleep", None).await;
        assert_eq!(body["sleepQuality"], json!(null));
        assert_eq!(body["hours"], json!(null));
    }
}
