use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes_projects::{bad_request, internal, not_found, ErrorBody};
use crate::state::SharedState;
use crate::types_project::PartRecord;

#[derive(Deserialize)]
pub struct CreatePartRequest {
    pub project: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct PartsQuery {
    pub project: Option<Uuid>,
}

pub async fn post_part(
    State(state): State<SharedState>,
    Json(req): Json<CreatePartRequest>,
) -> Result<(StatusCode, Json<PartRecord>), ErrorBody> {
    let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM projects WHERE id = $1")
        .bind(req.project)
        .fetch_optional(&state.pg_pool)
        .await
        .map_err(internal)?;
    if exists.is_none() {
        return Err(bad_request(format!("Unknown project: {}", req.project)));
    }

    let part: PartRecord = sqlx::query_as(
        r#"
        INSERT INTO parts (id, project_id, name)
        VALUES ($1, $2, $3)
        RETURNING id, project_id, name
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.project)
    .bind(&req.name)
    .fetch_one(&state.pg_pool)
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(part)))
}

/// List Parts, optionally scoped to one Project, in import order.
pub async fn get_parts(
    State(state): State<SharedState>,
    Query(q): Query<PartsQuery>,
) -> Result<Json<Vec<PartRecord>>, ErrorBody> {
    let rows: Vec<PartRecord> = match q.project {
        Some(project_id) => {
            sqlx::query_as(
                "SELECT id, project_id, name FROM parts WHERE project_id = $1 ORDER BY seq",
            )
            .bind(project_id)
            .fetch_all(&state.pg_pool)
            .await
        }
        None => {
            sqlx::query_as("SELECT id, project_id, name FROM parts ORDER BY seq")
                .fetch_all(&state.pg_pool)
                .await
        }
    }
    .map_err(internal)?;
    Ok(Json(rows))
}

pub async fn get_part(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PartRecord>, ErrorBody> {
    let row: Option<PartRecord> =
        sqlx::query_as("SELECT id, project_id, name FROM parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.pg_pool)
            .await
            .map_err(internal)?;
    row.map(Json).ok_or_else(|| not_found("Part"))
}
