mod app;
mod config;
mod demo;
mod error;
mod state;
mod users;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "users_api=debug,axum=info,tower_http=info,sqlx=warn".to_string());
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

    // Refuse to serve if the database or schema is not usable.
    let app_state = state::AppState::init().await?;

    let app = app::build_app(app_state.clone());
    let served = app::serve(app, &app_state.config).await;

    app_state.users.close().await;
    tracing::info!("database connections closed");
    served
}
