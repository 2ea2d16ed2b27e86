use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task input shape. Every field is optional for mapping purposes; values are
/// stored and echoed back with no transformation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TaskDraft {
    pub task_type: Option<String>,
    pub status: Option<String>,
    pub log: Option<String>,
    pub project_id: Option<Uuid>,
}

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct TaskRecord {
    pub id: Uuid,
    pub task_type: Option<String>,
    pub status: Option<String>,
    pub log: Option<String>,
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
