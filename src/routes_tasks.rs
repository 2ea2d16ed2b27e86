use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::routes_projects::{internal, not_found, ErrorBody};
use crate::state::SharedState;
use crate::types_task::{TaskDraft, TaskRecord};

// Pure passthrough: whatever fields come in are stored and echoed back.

pub async fn post_task(
    State(state): State<SharedState>,
    Json(draft): Json<TaskDraft>,
) -> Result<(StatusCode, Json<TaskRecord>), ErrorBody> {
    let task: TaskRecord = sqlx::query_as(
        r#"
        INSERT INTO tasks (id, task_type, status, log, project_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&draft.task_type)
    .bind(&draft.status)
    .bind(&draft.log)
    .bind(draft.project_id)
    .fetch_one(&state.pg_pool)
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_tasks(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TaskRecord>>, ErrorBody> {
    let rows: Vec<TaskRecord> = sqlx::query_as("SELECT * FROM tasks ORDER BY created_at DESC")
        .fetch_all(&state.pg_pool)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

pub async fn get_task(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskRecord>, ErrorBody> {
    let row: Option<TaskRecord> = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pg_pool)
        .await
        .map_err(internal)?;
    row.map(Json).ok_or_else(|| not_found("Task"))
}
