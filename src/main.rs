mod activity;
mod app;
mod clock;
mod config;
mod dashboard;
mod days;
mod error;
mod foods;
mod nutrition;
mod sleep;
mod state;
mod store;
mod weight;

#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "daylog=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = state::AppState::init().await?;
    tracing::info!(
        backend = ?state.config.store.backend,
        budget = state.config.calorie_budget,
        today = %days::day_key(state.today()),
        "record store ready"
    );

    app::serve(app::build_app(state)).await
}
