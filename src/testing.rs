//! Router-level test harness over an in-memory store and a fixed clock.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use time::Date;
use tower::ServiceExt;

use crate::app::build_app;
use crate::state::AppState;
use crate::store::MemoryStore;

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub fn new(today: Date) -> Self {
        Self::with_store(MemoryStore::new(), today)
    }

    pub fn with_store(store: MemoryStore, today: Date) -> Self {
        let store = Arc::new(store);
        let state = AppState::fake_with(Arc::clone(&store), today);
        Self {
            router: build_app(state.clone()),
            state,
            store,
        }
    }

    /// Same store, different day.
    pub fn on(&self, today: Date) -> Self {
        let state = AppState::fake_with(Arc::clone(&self.store), today);
        Self {
            router: build_app(state.clone()),
            state,
            store: Arc::clone(&self.store),
        }
    }
}

pub async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();

    let resp = app.router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
