use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{activity, dashboard, foods, nutrition, sleep, weight};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(nutrition::router())
                .merge(foods::router())
                .merge(weight::router())
                .merge(activity::router())
                .merge(sleep::router())
                .merge(dashboard::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::testing::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use time::macros::date;
    use tracing::field::{Field, Visit};
    use tracing::span::{Id, Record};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Collects every `status` value recorded onto a span after creation.
    #[derive(Clone, Default)]
    struct RecordedStatus(Arc<Mutex<Vec<String>>>);

    struct StatusField<'a>(&'a mut Vec<String>);

    impl Visit for StatusField<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "status" {
                self.0.push(format!("{value:?}"));
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for RecordedStatus {
        fn on_record(&self, _span: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
            let mut seen = self.0.lock().unwrap();
            values.record(&mut StatusField(&mut seen));
        }
    }

    #[tokio::test]
    async fn request_span_records_response_status() {
        let recorded = RecordedStatus::default();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(recorded.clone()));

        let app = TestApp::new(date!(2024 - 03 - 07));
        send(&app, Method::GET, "/api/health", None).await;

        assert_eq!(*recorded.0.lock().unwrap(), vec!["200 OK".to_string()]);
    }

    #[tokio::test]
    async fn health_and_unknown_routes() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        let (status, body) = send(&app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("ok"));

        let (status, _) = send(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_failures_surface_as_500_with_detail() {
        let app = TestApp::new(date!(2024 - 03 - 07));
        app.store.fail_writes_to("daily");
        let (status, body) = send(&app, Method::POST, "/api/steps", Some(json!({ "steps": 100 }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], json!("record store request failed"));
        assert!(body["detail"].as_str().is_some());
    }
}
