mod config;
mod intake;
mod routes_parts;
mod routes_projects;
mod routes_tasks;
mod state;
mod types_performance;
mod types_project;
mod types_task;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    // --- Postgres ---
    let pg_pool = PgPool::connect(&cfg.database_url)
        .await
        .context("Failed to connect to Postgres")?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run migrations")?;

    // --- Startup health check (fail fast) ---
    check_postgres(&pg_pool).await?;
    info!("postgres: ok");

    let app_state = Arc::new(AppState::new(pg_pool));

    let app = Router::new()
        .route("/api/projects", post(routes_projects::post_project))
        .route("/api/projects", get(routes_projects::get_projects))
        .route("/api/projects/:id", get(routes_projects::get_project))
        .route(
            "/api/projects/:id/train_performance",
            get(routes_projects::get_train_performance),
        )
        .route("/api/parts", post(routes_parts::post_part))
        .route("/api/parts", get(routes_parts::get_parts))
        .route("/api/parts/:id", get(routes_parts::get_part))
        .route("/api/tasks", post(routes_tasks::post_task))
        .route("/api/tasks", get(routes_tasks::get_tasks))
        .route("/api/tasks/:id", get(routes_tasks::get_task))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = &cfg.bind_addr;
    println!("vision-intake listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();

    Ok(())
}

async fn check_postgres(pg_pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pg_pool)
        .await
        .context("Postgres ping failed")?;
    Ok(())
}
