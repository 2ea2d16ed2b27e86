use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields a client may supply when creating a Project. The legacy schema
/// accepted these implicitly; here the list is explicit and must be kept in
/// sync with the `projects` table.
///
/// `prediction_uri` is declared even though only the labels-upload rule reads
/// it: callers uploading labels must supply it (see `intake::validate`).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectDraft {
    pub name: Option<String>,
    pub customvision_id: Option<String>,
    pub download_uri: Option<String>,
    pub is_demo: Option<bool>,
    pub is_prediction_module: Option<bool>,
    pub prediction_uri: Option<String>,
    pub prediction_header: Option<String>,
    pub need_retraining: Option<bool>,
    pub accuracy_range_min: Option<i32>,
    pub accuracy_range_max: Option<i32>,
    pub max_images: Option<i32>,
}

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub customvision_id: Option<String>,
    pub download_uri: Option<String>,
    pub is_demo: bool,
    pub is_prediction_module: bool,
    pub prediction_uri: Option<String>,
    pub prediction_header: Option<String>,
    pub need_retraining: bool,
    pub accuracy_range_min: i32,
    pub accuracy_range_max: i32,
    pub max_images: i32,
    pub created_at: DateTime<Utc>,
}

/// A label/class name owned by exactly one Project.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct PartRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
}
