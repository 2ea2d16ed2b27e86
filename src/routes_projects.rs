use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::intake::{self, IntakeError};
use crate::state::SharedState;
use crate::types_performance::{IterationName, IterationPerformance, ProjectPerformance};
use crate::types_project::{ProjectDraft, ProjectRecord};

pub type ErrorBody = (StatusCode, Json<serde_json::Value>);

pub fn bad_request(e: impl ToString) -> ErrorBody {
    (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()})))
}

pub fn internal(e: impl ToString) -> ErrorBody {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": e.to_string()})),
    )
}

pub fn not_found(what: &str) -> ErrorBody {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": format!("{what} not found")})),
    )
}

fn parse_flag(v: &str) -> bool {
    matches!(v, "1" | "true" | "TRUE" | "True" | "yes" | "YES")
}

fn parse_int(field: &str, v: &str) -> Result<i32, ErrorBody> {
    v.parse::<i32>()
        .map_err(|_| bad_request(format!("{field} must be an integer")))
}

/// Create a Project. Multipart form: text parts are Project fields, an
/// optional file part named `labels` holds newline-delimited label content
/// (write-only, never echoed back in the response).
pub async fn post_project(
    State(state): State<SharedState>,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<ProjectRecord>), ErrorBody> {
    let mut draft = ProjectDraft::default();
    let mut labels: Option<bytes::Bytes> = None;

    while let Some(field) = mp.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "labels" {
            labels = Some(field.bytes().await.map_err(bad_request)?);
            continue;
        }
        let text = field.text().await.map_err(bad_request)?;
        match name.as_str() {
            "name" => draft.name = Some(text),
            "customvision_id" => draft.customvision_id = Some(text),
            "download_uri" => draft.download_uri = Some(text),
            "is_demo" => draft.is_demo = Some(parse_flag(&text)),
            "is_prediction_module" => draft.is_prediction_module = Some(parse_flag(&text)),
            "prediction_uri" => draft.prediction_uri = Some(text),
            "prediction_header" => draft.prediction_header = Some(text),
            "need_retraining" => draft.need_retraining = Some(parse_flag(&text)),
            "accuracy_range_min" => {
                draft.accuracy_range_min = Some(parse_int("accuracy_range_min", &text)?)
            }
            "accuracy_range_max" => {
                draft.accuracy_range_max = Some(parse_int("accuracy_range_max", &text)?)
            }
            "max_images" => draft.max_images = Some(parse_int("max_images", &text)?),
            _ => {}
        }
    }

    let project = intake::create_project(&state.pg_pool, draft, labels)
        .await
        .map_err(|e| match e {
            IntakeError::Validation(_) | IntakeError::Decode(_) => bad_request(e),
            IntakeError::Storage(_) => internal(e),
        })?;

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_projects(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ProjectRecord>>, ErrorBody> {
    let rows: Vec<ProjectRecord> =
        sqlx::query_as("SELECT * FROM projects ORDER BY created_at DESC")
            .fetch_all(&state.pg_pool)
            .await
            .map_err(internal)?;
    Ok(Json(rows))
}

pub async fn get_project(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectRecord>, ErrorBody> {
    fetch_project(&state, id).await.map(Json)
}

async fn fetch_project(state: &SharedState, id: Uuid) -> Result<ProjectRecord, ErrorBody> {
    let row: Option<ProjectRecord> = sqlx::query_as("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pg_pool)
        .await
        .map_err(internal)?;
    row.ok_or_else(|| not_found("Project"))
}

/// Placeholder training report. Demo projects report a single `demo`
/// iteration; everything else reports `new`/`previous` as untrained with
/// zeroed metrics. Real metrics come from the training backend, which is not
/// wired in here.
pub async fn get_train_performance(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectPerformance>, ErrorBody> {
    let project = fetch_project(&state, id).await?;

    let iterations = if project.is_demo {
        vec![IterationPerformance {
            iteration_name: IterationName::Demo,
            iteration_id: project.customvision_id.unwrap_or_default(),
            status: "ok".to_string(),
            precision: 0.0,
            recall: 0.0,
            m_ap: 0.0,
        }]
    } else {
        [IterationName::New, IterationName::Previous]
            .into_iter()
            .map(|iteration_name| IterationPerformance {
                iteration_name,
                iteration_id: String::new(),
                status: "untrained".to_string(),
                precision: 0.0,
                recall: 0.0,
                m_ap: 0.0,
            })
            .collect()
    };

    let report = ProjectPerformance { iterations };
    report.validate().map_err(internal)?;
    Ok(Json(report))
}
